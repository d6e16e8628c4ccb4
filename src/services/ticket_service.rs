// src/services/ticket_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ClientRepository, TeamRepository, TicketRepository},
    models::ticket::{
        CreateTicketPayload, Ticket, TicketFilter, TicketPriority, TicketStatus, UpdateTicketPayload,
    },
};

#[derive(Clone)]
pub struct TicketService {
    repo: TicketRepository,
    client_repo: ClientRepository,
    team_repo: TeamRepository,
    pool: PgPool,
}

/// Decide o resolved_at para a mudança de status:
/// ao resolver/fechar carimba (se ainda não tinha), ao reabrir limpa.
pub fn resolved_at_for(
    new_status: TicketStatus,
    current: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if new_status.is_finished() {
        current.or(Some(now))
    } else {
        None
    }
}

impl TicketService {
    pub fn new(
        repo: TicketRepository,
        client_repo: ClientRepository,
        team_repo: TeamRepository,
        pool: PgPool,
    ) -> Self {
        Self { repo, client_repo, team_repo, pool }
    }

    pub async fn create_ticket(&self, payload: &CreateTicketPayload) -> Result<Ticket, AppError> {
        // A integridade é do banco (FK), mas a mensagem fica melhor checando antes
        if self.client_repo.find_by_id(payload.client_id).await?.is_none() {
            return Err(AppError::NotFound("Cliente"));
        }
        if let Some(member_id) = payload.assigned_to {
            self.ensure_active_member(member_id).await?;
        }

        let ticket = self.repo
            .create(
                &self.pool,
                payload.client_id,
                payload.title.trim(),
                payload.description.as_deref(),
                payload.priority.unwrap_or(TicketPriority::Medium),
                payload.category.as_deref(),
                payload.assigned_to,
            )
            .await?;

        tracing::info!("🎫 Ticket {} aberto para o cliente {}", ticket.id, ticket.client_id);
        Ok(ticket)
    }

    pub async fn get_ticket(&self, id: Uuid) -> Result<Ticket, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Ticket"))
    }

    pub async fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn update_ticket(&self, id: Uuid, payload: &UpdateTicketPayload) -> Result<Ticket, AppError> {
        self.repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Ticket"))
    }

    pub async fn assign_ticket(&self, id: Uuid, member_id: Option<Uuid>) -> Result<Ticket, AppError> {
        if let Some(member_id) = member_id {
            self.ensure_active_member(member_id).await?;
        }

        self.repo
            .assign(id, member_id)
            .await?
            .ok_or(AppError::NotFound("Ticket"))
    }

    pub async fn change_status(&self, id: Uuid, status: TicketStatus) -> Result<Ticket, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self.repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Ticket"))?;

        let resolved_at = resolved_at_for(status, current.resolved_at, Utc::now());
        let ticket = self.repo.set_status(&mut *tx, id, status, resolved_at).await?;

        tx.commit().await?;

        tracing::info!("🎫 Ticket {}: {:?} -> {:?}", id, current.status, status);
        Ok(ticket)
    }

    pub async fn delete_ticket(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Ticket"));
        }
        Ok(())
    }

    async fn ensure_active_member(&self, member_id: Uuid) -> Result<(), AppError> {
        match self.team_repo.find_member(member_id).await? {
            Some(member) if member.is_active => Ok(()),
            Some(_) => Err(AppError::BusinessRule(
                "Não é possível atribuir tickets a um membro inativo.".into(),
            )),
            None => Err(AppError::NotFound("Membro da equipe")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn resolving_stamps_once() {
        let now = Utc::now();
        let earlier = now - Duration::hours(3);

        assert_eq!(resolved_at_for(TicketStatus::Resolved, None, now), Some(now));
        assert_eq!(
            resolved_at_for(TicketStatus::Closed, Some(earlier), now),
            Some(earlier)
        );
    }

    #[test]
    fn reopening_clears_resolution() {
        let now = Utc::now();
        assert_eq!(resolved_at_for(TicketStatus::Open, Some(now), now), None);
        assert_eq!(resolved_at_for(TicketStatus::InProgress, None, now), None);
    }
}
