// src/services/dashboard_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{GoalRepository, NpsRepository, TicketRepository},
    models::{
        dashboard::DashboardSummary,
        goal::{GoalFilter, GoalProgress, GoalStatus},
    },
};

#[derive(Clone)]
pub struct DashboardService {
    ticket_repo: TicketRepository,
    nps_repo: NpsRepository,
    goal_repo: GoalRepository,
    pool: PgPool,
}

impl DashboardService {
    pub fn new(
        ticket_repo: TicketRepository,
        nps_repo: NpsRepository,
        goal_repo: GoalRepository,
        pool: PgPool,
    ) -> Self {
        Self { ticket_repo, nps_repo, goal_repo, pool }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        // Uma transação só: todos os cards leem o mesmo snapshot
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let tickets_by_status = self.ticket_repo.count_by_status(&mut *tx).await?;
        let open_by_priority = self.ticket_repo.count_open_by_priority(&mut *tx).await?;
        let avg_resolution_hours = self.ticket_repo.avg_resolution_hours(&mut *tx).await?;
        let nps = self.nps_repo.summary(&mut *tx).await?;

        let filter = GoalFilter {
            status: Some(GoalStatus::Active),
            ..Default::default()
        };
        let active_goals = self.goal_repo
            .list(&mut *tx, &filter)
            .await?
            .into_iter()
            .map(GoalProgress::from)
            .collect();

        tx.commit().await?;

        Ok(DashboardSummary {
            tickets_by_status,
            open_by_priority,
            avg_resolution_hours: avg_resolution_hours.map(|h| (h * 10.0).round() / 10.0),
            nps,
            active_goals,
        })
    }
}
