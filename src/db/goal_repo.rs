// src/db/goal_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::goal::{Goal, GoalFilter, GoalPeriod, GoalStatus},
};

#[derive(Clone)]
pub struct GoalRepository {
    pool: PgPool,
}

impl GoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Option<Uuid>,
        title: &str,
        description: Option<&str>,
        target_value: Decimal,
        period: GoalPeriod,
        due_date: Option<NaiveDate>,
    ) -> Result<Goal, AppError> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            INSERT INTO goals (owner_id, title, description, target_value, current_value, period, status, due_date)
            VALUES ($1, $2, $3, $4, 0, $5, 'active', $6)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(title)
        .bind(description)
        .bind(target_value)
        .bind(period)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(goal)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Goal>, AppError> {
        let goal = sqlx::query_as::<_, Goal>("SELECT * FROM goals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(goal)
    }

    pub async fn list<'e, E>(&self, executor: E, filter: &GoalFilter) -> Result<Vec<Goal>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM goals WHERE 1 = 1");

        if let Some(owner_id) = filter.owner_id {
            qb.push(" AND owner_id = ").push_bind(owner_id);
        }
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }

        qb.push(" ORDER BY due_date ASC NULLS LAST, created_at DESC");

        let goals = qb.build_query_as::<Goal>().fetch_all(executor).await?;
        Ok(goals)
    }

    pub async fn update_progress(
        &self,
        id: Uuid,
        current_value: Decimal,
        status: GoalStatus,
    ) -> Result<Option<Goal>, AppError> {
        let goal = sqlx::query_as::<_, Goal>(
            r#"
            UPDATE goals SET current_value = $2, status = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(current_value)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
