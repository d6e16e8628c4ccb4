// src/db/nps_repo.rs

use sqlx::{Executor, FromRow, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::nps::{NpsResponse, NpsSummary},
};

#[derive(FromRow)]
struct NpsCounts {
    promoters: i64,
    passives: i64,
    detractors: i64,
}

#[derive(Clone)]
pub struct NpsRepository {
    pool: PgPool,
}

impl NpsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        client_id: Option<Uuid>,
        ticket_id: Option<Uuid>,
        score: i16,
        comment: Option<&str>,
    ) -> Result<NpsResponse, AppError> {
        let response = sqlx::query_as::<_, NpsResponse>(
            r#"
            INSERT INTO nps_responses (client_id, ticket_id, score, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(client_id)
        .bind(ticket_id)
        .bind(score)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(response)
    }

    pub async fn list(&self) -> Result<Vec<NpsResponse>, AppError> {
        let responses = sqlx::query_as::<_, NpsResponse>(
            "SELECT * FROM nps_responses ORDER BY created_at DESC LIMIT 500",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(responses)
    }

    // A contagem é feita no banco; a fórmula do NPS fica no modelo
    pub async fn summary<'e, E>(&self, executor: E) -> Result<NpsSummary, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let counts = sqlx::query_as::<_, NpsCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE score >= 9) AS promoters,
                COUNT(*) FILTER (WHERE score BETWEEN 7 AND 8) AS passives,
                COUNT(*) FILTER (WHERE score <= 6) AS detractors
            FROM nps_responses
            "#,
        )
        .fetch_one(executor)
        .await?;

        Ok(NpsSummary::from_counts(counts.promoters, counts.passives, counts.detractors))
    }
}
