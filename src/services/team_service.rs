// src/services/team_service.rs

use sqlx::PgPool;
use uuid::Uuid;
use validator::ValidationError;

use crate::{
    common::error::AppError,
    db::TeamRepository,
    models::{
        auth::Role,
        team::{
            CreateSchedulePayload, CreateTeamMemberPayload, Schedule, ScheduleFilter, ScheduleStatus,
            TeamMember, UpdateTeamMemberPayload,
        },
    },
};

#[derive(Clone)]
pub struct TeamService {
    repo: TeamRepository,
    pool: PgPool,
}

/// Só quem está acima dos dois cargos (o atual e o novo) pode fazer a troca.
/// Admin pode qualquer troca.
pub fn can_change_role(actor: Role, current: Role, new: Role) -> bool {
    if actor == Role::Admin {
        return true;
    }
    actor.outranks(current) && actor.outranks(new)
}

pub fn check_schedule_window(payload: &CreateSchedulePayload) -> Result<(), AppError> {
    if payload.end_time <= payload.start_time {
        let mut errors = validator::ValidationErrors::new();
        let mut err = ValidationError::new("invalid_range");
        err.message = Some("O horário final deve ser depois do inicial.".into());
        errors.add("endTime", err);
        return Err(AppError::ValidationError(errors));
    }
    Ok(())
}

impl TeamService {
    pub fn new(repo: TeamRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // =========================================================================
    //  MEMBROS
    // =========================================================================

    pub async fn create_member(&self, payload: &CreateTeamMemberPayload) -> Result<TeamMember, AppError> {
        self.repo
            .create_member(
                &self.pool,
                payload.user_id,
                payload.name.trim(),
                &payload.email,
                payload.phone.as_deref(),
                payload.role.unwrap_or(Role::Agent),
            )
            .await
    }

    pub async fn list_members(&self, include_inactive: bool) -> Result<Vec<TeamMember>, AppError> {
        self.repo.list_members(include_inactive).await
    }

    pub async fn get_member(&self, id: Uuid) -> Result<TeamMember, AppError> {
        self.repo.find_member(id).await?.ok_or(AppError::NotFound("Membro da equipe"))
    }

    pub async fn update_member(&self, id: Uuid, payload: &UpdateTeamMemberPayload) -> Result<TeamMember, AppError> {
        self.repo
            .update_member(id, payload)
            .await?
            .ok_or(AppError::NotFound("Membro da equipe"))
    }

    pub async fn change_role(&self, actor: Role, id: Uuid, new_role: Role) -> Result<TeamMember, AppError> {
        let member = self.get_member(id).await?;

        if !can_change_role(actor, member.role, new_role) {
            tracing::warn!(
                "⛔ Troca de cargo negada: {:?} tentou mudar {:?} -> {:?}",
                actor, member.role, new_role
            );
            return Err(AppError::Forbidden);
        }

        self.repo
            .set_role(id, new_role)
            .await?
            .ok_or(AppError::NotFound("Membro da equipe"))
    }

    pub async fn deactivate_member(&self, id: Uuid) -> Result<TeamMember, AppError> {
        self.repo
            .deactivate_member(id)
            .await?
            .ok_or(AppError::NotFound("Membro da equipe"))
    }

    // =========================================================================
    //  ESCALAS
    // =========================================================================

    pub async fn create_schedule(&self, payload: &CreateSchedulePayload) -> Result<Schedule, AppError> {
        check_schedule_window(payload)?;

        let member = self.get_member(payload.member_id).await?;
        if !member.is_active {
            return Err(AppError::BusinessRule("Membro inativo não pode ser escalado.".into()));
        }

        self.repo
            .create_schedule(
                payload.member_id,
                payload.work_date,
                payload.start_time,
                payload.end_time,
                payload.shift,
                payload.notes.as_deref(),
            )
            .await
    }

    pub async fn list_schedules(&self, filter: &ScheduleFilter) -> Result<Vec<Schedule>, AppError> {
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            if from > to {
                return Err(AppError::BusinessRule("Período inválido: 'from' depois de 'to'.".into()));
            }
        }
        self.repo.list_schedules(filter).await
    }

    pub async fn set_schedule_status(&self, id: Uuid, status: ScheduleStatus) -> Result<Schedule, AppError> {
        self.repo
            .set_schedule_status(id, status)
            .await?
            .ok_or(AppError::NotFound("Escala"))
    }

    pub async fn delete_schedule(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_schedule(id).await? {
            return Err(AppError::NotFound("Escala"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use crate::models::team::Shift;

    #[test]
    fn role_changes_follow_hierarchy() {
        assert!(can_change_role(Role::Admin, Role::Admin, Role::Viewer));
        assert!(can_change_role(Role::Manager, Role::Agent, Role::Viewer));
        assert!(!can_change_role(Role::Manager, Role::Agent, Role::Manager));
        assert!(!can_change_role(Role::Manager, Role::Admin, Role::Agent));
        assert!(!can_change_role(Role::Agent, Role::Viewer, Role::Agent));
    }

    #[test]
    fn schedule_must_end_after_start() {
        let mut payload = CreateSchedulePayload {
            member_id: Uuid::new_v4(),
            work_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            shift: Shift::Afternoon,
            notes: None,
        };
        assert!(matches!(
            check_schedule_window(&payload),
            Err(AppError::ValidationError(_))
        ));

        payload.end_time = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
        assert!(check_schedule_window(&payload).is_ok());
    }
}
