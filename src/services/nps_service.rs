// src/services/nps_service.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::{NpsRepository, TicketRepository},
    models::nps::{CreateNpsPayload, NpsResponse, NpsSummary},
};

#[derive(Clone)]
pub struct NpsService {
    repo: NpsRepository,
    ticket_repo: TicketRepository,
    pool: PgPool,
}

impl NpsService {
    pub fn new(repo: NpsRepository, ticket_repo: TicketRepository, pool: PgPool) -> Self {
        Self { repo, ticket_repo, pool }
    }

    pub async fn record_response(&self, payload: &CreateNpsPayload) -> Result<NpsResponse, AppError> {
        let mut client_id = payload.client_id;

        // Resposta vinda de um ticket herda o cliente do ticket
        if let Some(ticket_id) = payload.ticket_id {
            let ticket = self.ticket_repo
                .find_by_id(&self.pool, ticket_id)
                .await?
                .ok_or(AppError::NotFound("Ticket"))?;

            match client_id {
                Some(id) if id != ticket.client_id => {
                    return Err(AppError::BusinessRule(
                        "O cliente informado não é o dono do ticket.".into(),
                    ));
                }
                _ => client_id = Some(ticket.client_id),
            }
        }

        self.repo
            .create(client_id, payload.ticket_id, payload.score, payload.comment.as_deref())
            .await
    }

    pub async fn list_responses(&self) -> Result<Vec<NpsResponse>, AppError> {
        self.repo.list().await
    }

    pub async fn summary(&self) -> Result<NpsSummary, AppError> {
        self.repo.summary(&self.pool).await
    }
}
