// src/models/knowledge.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "article_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeArticle {
    pub id: Uuid,
    pub author_id: Option<Uuid>,

    #[schema(example = "Como emitir a segunda via do boleto")]
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub tags: Vec<String>,

    pub status: ArticleStatus,
    pub views: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticlePayload {
    #[validate(length(min = 3, max = 200, message = "O título deve ter entre 3 e 200 caracteres."))]
    pub title: String,

    #[validate(length(min = 1, message = "required"))]
    pub content: String,

    pub category: Option<String>,

    #[serde(default)]
    #[schema(example = json!(["financeiro", "boleto"]))]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticlePayload {
    #[validate(length(min = 3, max = 200, message = "O título deve ter entre 3 e 200 caracteres."))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    pub content: Option<String>,

    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ArticleFilter {
    /// Busca em título e conteúdo
    pub q: Option<String>,
    pub category: Option<String>,
    pub status: Option<ArticleStatus>,
}
