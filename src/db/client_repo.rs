// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::client::{Client, ClientFilter, ClientStatus, UpdateClientPayload},
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: Option<&str>,
        phone: Option<&str>,
        document: Option<&str>,
        company: Option<&str>,
        status: ClientStatus,
        notes: Option<&str>,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone, document, company, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(document)
        .bind(company)
        .bind(status)
        .bind(notes)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_unique(e, format!("Documento '{}' já cadastrado.", document.unwrap_or("?"))))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(client)
    }

    /// Lista com filtros opcionais. A busca textual cobre nome, e-mail e documento.
    pub async fn list(&self, filter: &ClientFilter) -> Result<Vec<Client>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM clients WHERE 1 = 1");

        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }

        if let Some(q) = filter.q.as_deref().filter(|q| !q.trim().is_empty()) {
            let term = format!("%{}%", q.trim());
            qb.push(" AND (name ILIKE ")
                .push_bind(term.clone())
                .push(" OR email ILIKE ")
                .push_bind(term.clone())
                .push(" OR document ILIKE ")
                .push_bind(term)
                .push(")");
        }

        qb.push(" ORDER BY name ASC LIMIT 200");

        let clients = qb.build_query_as::<Client>().fetch_all(&self.pool).await?;
        Ok(clients)
    }

    // COALESCE mantém o valor atual quando o campo não veio no payload
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateClientPayload,
        document: Option<&str>,
    ) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                document = COALESCE($5, document),
                company = COALESCE($6, company),
                status = COALESCE($7, status),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.phone.as_deref())
        .bind(document)
        .bind(input.company.as_deref())
        .bind(input.status)
        .bind(input.notes.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_unique(e, "Documento já cadastrado para outro cliente."))?;

        Ok(client)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
