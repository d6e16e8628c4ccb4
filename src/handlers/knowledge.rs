// src/handlers/knowledge.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::knowledge::{
        ArticleFilter, ArticleStatus, CreateArticlePayload, KnowledgeArticle, UpdateArticlePayload,
    },
};

// POST /api/knowledge
#[utoipa::path(
    post,
    path = "/api/knowledge",
    tag = "Knowledge",
    request_body = CreateArticlePayload,
    responses(
        (status = 201, description = "Artigo criado como rascunho", body = KnowledgeArticle)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_article(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateArticlePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let article = app_state.knowledge_service.create_article(Some(user.id), &payload).await?;

    Ok((StatusCode::CREATED, Json(article)))
}

// GET /api/knowledge
#[utoipa::path(
    get,
    path = "/api/knowledge",
    tag = "Knowledge",
    params(ArticleFilter),
    responses(
        (status = 200, description = "Artigos encontrados", body = Vec<KnowledgeArticle>)
    ),
    security(("api_jwt" = []))
)]
pub async fn search_articles(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(filter): Query<ArticleFilter>,
) -> Result<impl IntoResponse, AppError> {
    let articles = app_state.knowledge_service.search_articles(user.role, filter).await?;

    Ok(Json(articles))
}

// GET /api/knowledge/{id}
#[utoipa::path(
    get,
    path = "/api/knowledge/{id}",
    tag = "Knowledge",
    params(("id" = Uuid, Path, description = "ID do artigo")),
    responses(
        (status = 200, description = "Artigo (conta uma visualização)", body = KnowledgeArticle),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_article(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.knowledge_service.get_article(user.role, id).await?;

    Ok(Json(article))
}

// PATCH /api/knowledge/{id}
#[utoipa::path(
    patch,
    path = "/api/knowledge/{id}",
    tag = "Knowledge",
    params(("id" = Uuid, Path, description = "ID do artigo")),
    request_body = UpdateArticlePayload,
    responses(
        (status = 200, description = "Artigo atualizado", body = KnowledgeArticle)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_article(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateArticlePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let article = app_state.knowledge_service.update_article(id, &payload).await?;

    Ok(Json(article))
}

// POST /api/knowledge/{id}/publish
#[utoipa::path(
    post,
    path = "/api/knowledge/{id}/publish",
    tag = "Knowledge",
    params(("id" = Uuid, Path, description = "ID do artigo")),
    responses(
        (status = 200, description = "Artigo publicado", body = KnowledgeArticle)
    ),
    security(("api_jwt" = []))
)]
pub async fn publish_article(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.knowledge_service.set_status(id, ArticleStatus::Published).await?;

    Ok(Json(article))
}

// POST /api/knowledge/{id}/archive
#[utoipa::path(
    post,
    path = "/api/knowledge/{id}/archive",
    tag = "Knowledge",
    params(("id" = Uuid, Path, description = "ID do artigo")),
    responses(
        (status = 200, description = "Artigo arquivado", body = KnowledgeArticle)
    ),
    security(("api_jwt" = []))
)]
pub async fn archive_article(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.knowledge_service.set_status(id, ArticleStatus::Archived).await?;

    Ok(Json(article))
}

// DELETE /api/knowledge/{id}
#[utoipa::path(
    delete,
    path = "/api/knowledge/{id}",
    tag = "Knowledge",
    params(("id" = Uuid, Path, description = "ID do artigo")),
    responses(
        (status = 204, description = "Artigo removido")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_article(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.knowledge_service.delete_article(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
