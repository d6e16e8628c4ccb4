// src/migration/datasets.rs

//! Amostras embutidas usadas quando `MIGRATION_SOURCE=bundled`.
//! Os registros têm o formato das linhas do Postgres de origem.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::client::{RecordSource, SinkError};

pub fn clients() -> Vec<Value> {
    vec![
        json!({
            "id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e01",
            "name": "Mariana Souza",
            "email": "mariana.souza@example.com",
            "phone": "11987654321",
            "document": "52998224725",
            "company": null,
            "status": "active",
            "notes": "Cliente desde 2021",
            "created_at": "2024-02-01T12:00:00Z",
            "updated_at": "2024-02-01T12:00:00Z"
        }),
        json!({
            "id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e02",
            "name": "Padaria Pão Quente LTDA",
            "email": "contato@paoquente.example.com",
            "phone": "1133224455",
            "document": "11222333000181",
            "company": "Padaria Pão Quente",
            "status": "active",
            "notes": null,
            "created_at": "2024-02-03T09:30:00Z",
            "updated_at": "2024-02-03T09:30:00Z"
        }),
        json!({
            "id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e03",
            "name": "Ricardo Lima",
            "email": "ricardo.lima@example.com",
            "phone": "21998877665",
            "document": "39053344705",
            "company": null,
            "status": "lead",
            "notes": "Pediu orçamento pelo site",
            "created_at": "2024-02-10T15:45:00Z",
            "updated_at": "2024-02-10T15:45:00Z"
        }),
        json!({
            "id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e04",
            "name": "Oficina Roda Viva",
            "email": "financeiro@rodaviva.example.com",
            "phone": "31988776655",
            "document": "45678912000155",
            "company": "Oficina Roda Viva",
            "status": "inactive",
            "notes": null,
            "created_at": "2024-01-20T08:00:00Z",
            "updated_at": "2024-03-01T08:00:00Z"
        }),
    ]
}

pub fn team_members() -> Vec<Value> {
    vec![
        json!({
            "id": "a3b9c1d2-0000-4000-8000-000000000001",
            "user_id": null,
            "name": "Ana Paula Ribeiro",
            "email": "ana.ribeiro@example.com",
            "phone": "11912345678",
            "role": "manager",
            "is_active": true,
            "created_at": "2024-01-05T10:00:00Z",
            "updated_at": "2024-01-05T10:00:00Z"
        }),
        json!({
            "id": "a3b9c1d2-0000-4000-8000-000000000002",
            "user_id": null,
            "name": "Bruno Carvalho",
            "email": "bruno.carvalho@example.com",
            "phone": "11923456789",
            "role": "agent",
            "is_active": true,
            "created_at": "2024-01-06T10:00:00Z",
            "updated_at": "2024-01-06T10:00:00Z"
        }),
        json!({
            "id": "a3b9c1d2-0000-4000-8000-000000000003",
            "user_id": null,
            "name": "Camila Fernandes",
            "email": "camila.fernandes@example.com",
            "phone": null,
            "role": "agent",
            "is_active": false,
            "created_at": "2024-01-07T10:00:00Z",
            "updated_at": "2024-04-02T10:00:00Z"
        }),
    ]
}

pub fn tickets() -> Vec<Value> {
    vec![
        json!({
            "id": "d1e2f3a4-0000-4000-8000-000000000001",
            "client_id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e01",
            "assigned_to": "a3b9c1d2-0000-4000-8000-000000000002",
            "title": "Boleto não chegou",
            "description": "Cliente não recebeu o boleto de março por e-mail",
            "status": "resolved",
            "priority": "medium",
            "resolved_at": "2024-03-05T14:00:00Z",
            "created_at": "2024-03-04T09:00:00Z",
            "updated_at": "2024-03-05T14:00:00Z"
        }),
        json!({
            "id": "d1e2f3a4-0000-4000-8000-000000000002",
            "client_id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e02",
            "assigned_to": null,
            "title": "Erro ao emitir nota fiscal",
            "description": "Sistema retorna rejeição 539 na emissão",
            "status": "open",
            "priority": "urgent",
            "resolved_at": null,
            "created_at": "2024-03-10T11:20:00Z",
            "updated_at": "2024-03-10T11:20:00Z"
        }),
        json!({
            "id": "d1e2f3a4-0000-4000-8000-000000000003",
            "client_id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e03",
            "assigned_to": "a3b9c1d2-0000-4000-8000-000000000001",
            "title": "Dúvida sobre plano anual",
            "description": null,
            "status": "waiting",
            "priority": "low",
            "resolved_at": null,
            "created_at": "2024-03-12T16:10:00Z",
            "updated_at": "2024-03-13T08:00:00Z"
        }),
    ]
}

pub fn schedules() -> Vec<Value> {
    vec![
        json!({
            "id": "e5f6a7b8-0000-4000-8000-000000000001",
            "member_id": "a3b9c1d2-0000-4000-8000-000000000001",
            "work_date": "2024-03-18",
            "start_time": "08:00:00",
            "end_time": "14:00:00",
            "shift": "morning",
            "status": "completed",
            "notes": null,
            "created_at": "2024-03-15T10:00:00Z",
            "updated_at": "2024-03-18T14:00:00Z"
        }),
        json!({
            "id": "e5f6a7b8-0000-4000-8000-000000000002",
            "member_id": "a3b9c1d2-0000-4000-8000-000000000002",
            "work_date": "2024-03-18",
            "start_time": "14:00:00",
            "end_time": "20:00:00",
            "shift": "afternoon",
            "status": "scheduled",
            "notes": "Cobrir plantão do suporte",
            "created_at": "2024-03-15T10:05:00Z",
            "updated_at": "2024-03-15T10:05:00Z"
        }),
    ]
}

pub fn goals() -> Vec<Value> {
    vec![
        json!({
            "id": "f0a1b2c3-0000-4000-8000-000000000001",
            "owner_id": "a3b9c1d2-0000-4000-8000-000000000002",
            "title": "Resolver 120 chamados no mês",
            "description": null,
            "period": "monthly",
            "target_value": 120,
            "current_value": 87,
            "status": "active",
            "due_date": "2024-03-31",
            "created_at": "2024-03-01T09:00:00Z",
            "updated_at": "2024-03-20T18:00:00Z"
        }),
        json!({
            "id": "f0a1b2c3-0000-4000-8000-000000000002",
            "owner_id": null,
            "title": "NPS acima de 70 no trimestre",
            "description": "Meta da equipe inteira",
            "period": "quarterly",
            "target_value": 70,
            "current_value": 72,
            "status": "completed",
            "due_date": "2024-03-31",
            "created_at": "2024-01-02T09:00:00Z",
            "updated_at": "2024-03-28T12:00:00Z"
        }),
    ]
}

pub fn knowledge_articles() -> Vec<Value> {
    vec![
        json!({
            "id": "0b1c2d3e-0000-4000-8000-000000000001",
            "author_id": null,
            "title": "Como reenviar a segunda via do boleto",
            "content": "Acesse Financeiro > Cobranças, localize a fatura e clique em Reenviar.",
            "category": "financeiro",
            "tags": ["boleto", "cobranca"],
            "status": "published",
            "views": 42,
            "created_at": "2024-01-15T10:00:00Z",
            "updated_at": "2024-02-01T10:00:00Z"
        }),
        json!({
            "id": "0b1c2d3e-0000-4000-8000-000000000002",
            "author_id": null,
            "title": "Rejeição 539 na emissão de NF-e",
            "content": "Duplicidade de NF-e com diferença na chave de acesso. Consulte a SEFAZ antes de reenviar.",
            "category": "fiscal",
            "tags": ["nfe", "sefaz"],
            "status": "draft",
            "views": 0,
            "created_at": "2024-03-11T09:00:00Z",
            "updated_at": "2024-03-11T09:00:00Z"
        }),
    ]
}

pub fn nps_responses() -> Vec<Value> {
    vec![
        json!({
            "id": "1a2b3c4d-0000-4000-8000-000000000001",
            "client_id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e01",
            "ticket_id": "d1e2f3a4-0000-4000-8000-000000000001",
            "score": 10,
            "comment": "Resolveram no dia seguinte, ótimo atendimento",
            "created_at": "2024-03-06T10:00:00Z"
        }),
        json!({
            "id": "1a2b3c4d-0000-4000-8000-000000000002",
            "client_id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e02",
            "ticket_id": null,
            "score": 6,
            "comment": "Demora no primeiro contato",
            "created_at": "2024-03-12T10:00:00Z"
        }),
        json!({
            "id": "1a2b3c4d-0000-4000-8000-000000000003",
            "client_id": "7c1f0b52-2d4a-4f7e-9a51-0f3d2b1c9e03",
            "ticket_id": null,
            "score": 8,
            "comment": null,
            "created_at": "2024-03-14T10:00:00Z"
        }),
    ]
}

/// Todas as amostras, indexadas pelo nome da tabela de origem.
pub fn all() -> HashMap<String, Vec<Value>> {
    HashMap::from([
        ("clients".to_string(), clients()),
        ("team_members".to_string(), team_members()),
        ("tickets".to_string(), tickets()),
        ("schedules".to_string(), schedules()),
        ("goals".to_string(), goals()),
        ("knowledge_articles".to_string(), knowledge_articles()),
        ("nps_responses".to_string(), nps_responses()),
    ])
}

/// Origem em memória. Tabela ausente responde como 404 do REST.
pub struct BundledSource {
    tables: HashMap<String, Vec<Value>>,
}

impl BundledSource {
    pub fn new(tables: HashMap<String, Vec<Value>>) -> Self {
        Self { tables }
    }
}

impl Default for BundledSource {
    fn default() -> Self {
        Self::new(all())
    }
}

#[async_trait]
impl RecordSource for BundledSource {
    async fn fetch_all(&self, table: &str) -> Result<Vec<Value>, SinkError> {
        self.tables.get(table).cloned().ok_or(SinkError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::validation::validate_document;
    use crate::migration::mapping::MAPPINGS;

    #[test]
    fn every_mapping_has_sample_data() {
        let data = all();
        for mapping in MAPPINGS {
            assert!(
                data.get(mapping.source).is_some_and(|rows| !rows.is_empty()),
                "sem amostra para {}",
                mapping.source
            );
        }
    }

    #[test]
    fn sample_documents_are_valid() {
        for client in clients() {
            let document = client["document"].as_str().unwrap();
            assert!(validate_document(document), "documento inválido: {}", document);
        }
    }

    #[tokio::test]
    async fn missing_table_is_not_found() {
        let source = BundledSource::default();
        assert_eq!(source.fetch_all("clients").await.unwrap().len(), 4);
        assert!(matches!(source.fetch_all("pedidos").await, Err(SinkError::NotFound)));
    }
}
