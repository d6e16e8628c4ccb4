// src/handlers/nps.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::nps::{CreateNpsPayload, NpsResponse, NpsSummary},
};

// POST /api/nps/responses (público: o link da pesquisa vai para o cliente)
#[utoipa::path(
    post,
    path = "/api/nps/responses",
    tag = "NPS",
    request_body = CreateNpsPayload,
    responses(
        (status = 201, description = "Resposta registrada", body = NpsResponse),
        (status = 400, description = "Nota fora de 0 a 10")
    )
)]
pub async fn record_response(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateNpsPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.nps_service.record_response(&payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// GET /api/nps/responses
#[utoipa::path(
    get,
    path = "/api/nps/responses",
    tag = "NPS",
    responses(
        (status = 200, description = "Respostas mais recentes", body = Vec<NpsResponse>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_responses(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let responses = app_state.nps_service.list_responses().await?;

    Ok(Json(responses))
}

// GET /api/nps/summary
#[utoipa::path(
    get,
    path = "/api/nps/summary",
    tag = "NPS",
    responses(
        (status = 200, description = "Promotores, neutros, detratores e NPS", body = NpsSummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.nps_service.summary().await?;

    Ok(Json(summary))
}
