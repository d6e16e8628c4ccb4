// src/db/ticket_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{PriorityCount, StatusCount},
        ticket::{Ticket, TicketFilter, TicketPriority, TicketStatus, UpdateTicketPayload},
    },
};

#[derive(Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        client_id: Uuid,
        title: &str,
        description: Option<&str>,
        priority: TicketPriority,
        category: Option<&str>,
        assigned_to: Option<Uuid>,
    ) -> Result<Ticket, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (client_id, title, description, status, priority, category, assigned_to)
            VALUES ($1, $2, $3, 'open', $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(category)
        .bind(assigned_to)
        .fetch_one(executor)
        .await?;

        Ok(ticket)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Ticket>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(ticket)
    }

    pub async fn list(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM tickets WHERE 1 = 1");

        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(priority) = filter.priority {
            qb.push(" AND priority = ").push_bind(priority);
        }
        if let Some(client_id) = filter.client_id {
            qb.push(" AND client_id = ").push_bind(client_id);
        }
        if let Some(assigned_to) = filter.assigned_to {
            qb.push(" AND assigned_to = ").push_bind(assigned_to);
        }

        qb.push(" ORDER BY created_at DESC LIMIT 500");

        let tickets = qb.build_query_as::<Ticket>().fetch_all(&self.pool).await?;
        Ok(tickets)
    }

    pub async fn update(&self, id: Uuid, input: &UpdateTicketPayload) -> Result<Option<Ticket>, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                category = COALESCE($5, category),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.title.as_deref())
        .bind(input.description.as_deref())
        .bind(input.priority)
        .bind(input.category.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    pub async fn assign(&self, id: Uuid, assigned_to: Option<Uuid>) -> Result<Option<Ticket>, AppError> {
        let ticket = sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET assigned_to = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(assigned_to)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Grava o status e o resolved_at já decididos pelo serviço.
    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: TicketStatus,
        resolved_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Ticket, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets SET status = $2, resolved_at = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(resolved_at)
        .fetch_one(executor)
        .await?;

        Ok(ticket)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // --- Indicadores (usados pelo painel) ---

    pub async fn count_by_status<'e, E>(&self, executor: E) -> Result<Vec<StatusCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, StatusCount>(
            "SELECT status, COUNT(*) AS total FROM tickets GROUP BY status ORDER BY status",
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    pub async fn count_open_by_priority<'e, E>(&self, executor: E) -> Result<Vec<PriorityCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, PriorityCount>(
            r#"
            SELECT priority, COUNT(*) AS total
            FROM tickets
            WHERE status NOT IN ('resolved', 'closed')
            GROUP BY priority
            ORDER BY priority
            "#,
        )
        .fetch_all(executor)
        .await?;

        Ok(rows)
    }

    pub async fn avg_resolution_hours<'e, E>(&self, executor: E) -> Result<Option<f64>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let avg: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT (AVG(EXTRACT(EPOCH FROM (resolved_at - created_at))) / 3600.0)::float8
            FROM tickets
            WHERE resolved_at IS NOT NULL
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(avg)
    }
}
