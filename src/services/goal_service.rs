// src/services/goal_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::GoalRepository,
    models::goal::{CreateGoalPayload, Goal, GoalFilter, GoalProgress, GoalStatus},
};

#[derive(Clone)]
pub struct GoalService {
    repo: GoalRepository,
    pool: PgPool,
}

/// Atingir o alvo conclui a meta ativa. Metas canceladas ou já concluídas não mudam.
pub fn status_after_progress(status: GoalStatus, current: Decimal, target: Decimal) -> GoalStatus {
    match status {
        GoalStatus::Active if current >= target => GoalStatus::Completed,
        other => other,
    }
}

impl GoalService {
    pub fn new(repo: GoalRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_goal(&self, payload: &CreateGoalPayload) -> Result<Goal, AppError> {
        if payload.target_value <= Decimal::ZERO {
            return Err(AppError::BusinessRule("O valor alvo deve ser maior que zero.".into()));
        }

        self.repo
            .create(
                payload.owner_id,
                payload.title.trim(),
                payload.description.as_deref(),
                payload.target_value,
                payload.period,
                payload.due_date,
            )
            .await
    }

    pub async fn list_goals(&self, filter: &GoalFilter) -> Result<Vec<GoalProgress>, AppError> {
        let goals = self.repo.list(&self.pool, filter).await?;
        Ok(goals.into_iter().map(GoalProgress::from).collect())
    }

    pub async fn update_progress(&self, id: Uuid, current_value: Decimal) -> Result<GoalProgress, AppError> {
        if current_value < Decimal::ZERO {
            return Err(AppError::BusinessRule("O progresso não pode ser negativo.".into()));
        }

        let goal = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound("Meta"))?;
        let status = status_after_progress(goal.status, current_value, goal.target_value);

        if status != goal.status {
            tracing::info!("🏁 Meta '{}' concluída", goal.title);
        }

        let updated = self.repo
            .update_progress(id, current_value, status)
            .await?
            .ok_or(AppError::NotFound("Meta"))?;

        Ok(updated.into())
    }

    pub async fn delete_goal(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Meta"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reaching_target_completes_active_goal() {
        let target = Decimal::from(100);
        assert_eq!(
            status_after_progress(GoalStatus::Active, Decimal::from(100), target),
            GoalStatus::Completed
        );
        assert_eq!(
            status_after_progress(GoalStatus::Active, Decimal::from(99), target),
            GoalStatus::Active
        );
    }

    #[test]
    fn cancelled_goal_stays_cancelled() {
        assert_eq!(
            status_after_progress(GoalStatus::Cancelled, Decimal::from(500), Decimal::from(100)),
            GoalStatus::Cancelled
        );
    }
}
