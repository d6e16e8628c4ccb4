// src/models/client.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{cpf_or_cnpj, phone_number};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "client_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Lead,
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,

    // CPF ou CNPJ, sempre só dígitos no banco
    #[schema(example = "11222333000181")]
    pub document: Option<String>,

    pub company: Option<String>,
    pub status: ClientStatus,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Padaria Pão Quente Ltda")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "contato@paoquente.com.br")]
    pub email: Option<String>,

    #[validate(custom(function = "phone_number"))]
    #[schema(example = "(11) 98765-4321")]
    pub phone: Option<String>,

    #[validate(custom(function = "cpf_or_cnpj"))]
    #[schema(example = "11.222.333/0001-81")]
    pub document: Option<String>,

    pub company: Option<String>,
    pub status: Option<ClientStatus>,
    pub notes: Option<String>,
}

// Atualização parcial: só o que vier preenchido é alterado
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    pub name: Option<String>,

    #[validate(email(message = "invalid_email"))]
    pub email: Option<String>,

    #[validate(custom(function = "phone_number"))]
    pub phone: Option<String>,

    #[validate(custom(function = "cpf_or_cnpj"))]
    pub document: Option<String>,

    pub company: Option<String>,
    pub status: Option<ClientStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ClientFilter {
    pub status: Option<ClientStatus>,
    /// Busca por nome, e-mail ou documento
    pub q: Option<String>,
}
