// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Mapeia o CREATE TYPE user_role do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Agent,
    Viewer,
}

/// Hierarquia dos cargos, do maior para o menor.
/// O guard de rotas NÃO consulta esta tabela: ele só compara com a lista exigida.
pub const ROLE_HIERARCHY: [(Role, u8); 4] = [
    (Role::Admin, 100),
    (Role::Manager, 50),
    (Role::Agent, 10),
    (Role::Viewer, 1),
];

impl Role {
    pub fn level(self) -> u8 {
        ROLE_HIERARCHY
            .iter()
            .find(|(role, _)| *role == self)
            .map(|(_, level)| *level)
            .unwrap_or(0)
    }

    pub fn outranks(self, other: Role) -> bool {
        self.level() > other.level()
    }

    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Manager | Role::Agent)
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "ana@suporte.com.br")]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 2, message = "O nome deve ter no mínimo 2 caracteres."))]
    #[schema(example = "Ana Souza")]
    pub full_name: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub role: Role,
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_orders_roles() {
        assert!(Role::Admin.outranks(Role::Manager));
        assert!(Role::Manager.outranks(Role::Agent));
        assert!(Role::Agent.outranks(Role::Viewer));
        assert!(!Role::Agent.outranks(Role::Agent));
        assert!(!Role::Viewer.outranks(Role::Admin));
    }

    #[test]
    fn viewers_are_not_staff() {
        assert!(Role::Agent.is_staff());
        assert!(!Role::Viewer.is_staff());
    }
}
