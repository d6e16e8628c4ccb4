// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::only_digits},
    db::ClientRepository,
    models::client::{Client, ClientFilter, ClientStatus, CreateClientPayload, UpdateClientPayload},
};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
    pool: PgPool,
}

// Documento é guardado sem máscara, para a busca e a unicidade funcionarem
fn normalize_document(document: Option<&str>) -> Option<String> {
    document
        .map(only_digits)
        .filter(|d| !d.is_empty())
}

impl ClientService {
    pub fn new(repo: ClientRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_client(&self, payload: &CreateClientPayload) -> Result<Client, AppError> {
        let document = normalize_document(payload.document.as_deref());

        self.repo
            .create(
                &self.pool,
                payload.name.trim(),
                payload.email.as_deref(),
                payload.phone.as_deref(),
                document.as_deref(),
                payload.company.as_deref(),
                payload.status.unwrap_or(ClientStatus::Lead),
                payload.notes.as_deref(),
            )
            .await
    }

    pub async fn get_client(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo.find_by_id(id).await?.ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn list_clients(&self, filter: &ClientFilter) -> Result<Vec<Client>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn update_client(
        &self,
        id: Uuid,
        payload: &UpdateClientPayload,
    ) -> Result<Client, AppError> {
        let document = normalize_document(payload.document.as_deref());

        self.repo
            .update(id, payload, document.as_deref())
            .await?
            .ok_or(AppError::NotFound("Cliente"))
    }

    pub async fn delete_client(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::NotFound("Cliente"));
        }
        tracing::info!("🗑️ Cliente {} removido", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_document_mask() {
        assert_eq!(
            normalize_document(Some("11.222.333/0001-81")).as_deref(),
            Some("11222333000181")
        );
        assert_eq!(normalize_document(Some(" -. ")), None);
        assert_eq!(normalize_document(None), None);
    }
}
