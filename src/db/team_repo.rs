// src/db/team_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::Role,
        team::{Schedule, ScheduleFilter, ScheduleStatus, Shift, TeamMember, UpdateTeamMemberPayload},
    },
};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  MEMBROS
    // =========================================================================

    pub async fn create_member<'e, E>(
        &self,
        executor: E,
        user_id: Option<Uuid>,
        name: &str,
        email: &str,
        phone: Option<&str>,
        role: Role,
    ) -> Result<TeamMember, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, TeamMember>(
            r#"
            INSERT INTO team_members (user_id, name, email, phone, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(role)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique(e, format!("Já existe um membro com o e-mail '{}'.", email)))
    }

    pub async fn find_member(&self, id: Uuid) -> Result<Option<TeamMember>, AppError> {
        let member = sqlx::query_as::<_, TeamMember>("SELECT * FROM team_members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(member)
    }

    pub async fn list_members(&self, include_inactive: bool) -> Result<Vec<TeamMember>, AppError> {
        let members = sqlx::query_as::<_, TeamMember>(
            "SELECT * FROM team_members WHERE is_active OR $1 ORDER BY name ASC",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    pub async fn update_member(
        &self,
        id: Uuid,
        input: &UpdateTeamMemberPayload,
    ) -> Result<Option<TeamMember>, AppError> {
        let member = sqlx::query_as::<_, TeamMember>(
            r#"
            UPDATE team_members SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_unique(e, "E-mail já usado por outro membro."))?;

        Ok(member)
    }

    pub async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<TeamMember>, AppError> {
        let mut tx = self.pool.begin().await?;

        let member = sqlx::query_as::<_, TeamMember>(
            "UPDATE team_members SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(&mut *tx)
        .await?;

        // O cargo do login acompanha o cargo na equipe
        if let Some(user_id) = member.as_ref().and_then(|m| m.user_id) {
            sqlx::query("UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1")
                .bind(user_id)
                .bind(role)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(member)
    }

    pub async fn deactivate_member(&self, id: Uuid) -> Result<Option<TeamMember>, AppError> {
        let member = sqlx::query_as::<_, TeamMember>(
            "UPDATE team_members SET is_active = false, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    // =========================================================================
    //  ESCALAS
    // =========================================================================

    pub async fn create_schedule(
        &self,
        member_id: Uuid,
        work_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        shift: Shift,
        notes: Option<&str>,
    ) -> Result<Schedule, AppError> {
        sqlx::query_as::<_, Schedule>(
            r#"
            INSERT INTO schedules (member_id, work_date, start_time, end_time, shift, status, notes)
            VALUES ($1, $2, $3, $4, $5, 'scheduled', $6)
            RETURNING *
            "#,
        )
        .bind(member_id)
        .bind(work_date)
        .bind(start_time)
        .bind(end_time)
        .bind(shift)
        .bind(notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_unique(e, "O membro já tem escala neste turno e data."))
    }

    pub async fn list_schedules(&self, filter: &ScheduleFilter) -> Result<Vec<Schedule>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM schedules WHERE 1 = 1");

        if let Some(member_id) = filter.member_id {
            qb.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(from) = filter.from {
            qb.push(" AND work_date >= ").push_bind(from);
        }
        if let Some(to) = filter.to {
            qb.push(" AND work_date <= ").push_bind(to);
        }

        qb.push(" ORDER BY work_date ASC, start_time ASC");

        let schedules = qb.build_query_as::<Schedule>().fetch_all(&self.pool).await?;
        Ok(schedules)
    }

    pub async fn set_schedule_status(
        &self,
        id: Uuid,
        status: ScheduleStatus,
    ) -> Result<Option<Schedule>, AppError> {
        let schedule = sqlx::query_as::<_, Schedule>(
            "UPDATE schedules SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(schedule)
    }

    pub async fn delete_schedule(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
