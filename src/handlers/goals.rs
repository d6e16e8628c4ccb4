// src/handlers/goals.rs

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
    models::goal::{CreateGoalPayload, Goal, GoalFilter, GoalProgress, UpdateGoalProgressPayload},
};

// POST /api/goals
#[utoipa::path(
    post,
    path = "/api/goals",
    tag = "Goals",
    request_body = CreateGoalPayload,
    responses(
        (status = 201, description = "Meta criada", body = Goal),
        (status = 400, description = "Valor alvo inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_goal(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateGoalPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let goal = app_state.goal_service.create_goal(&payload).await?;

    Ok((StatusCode::CREATED, Json(goal)))
}

// GET /api/goals
#[utoipa::path(
    get,
    path = "/api/goals",
    tag = "Goals",
    params(GoalFilter),
    responses(
        (status = 200, description = "Metas com percentual atingido", body = Vec<GoalProgress>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_goals(
    State(app_state): State<AppState>,
    Query(filter): Query<GoalFilter>,
) -> Result<impl IntoResponse, AppError> {
    let goals = app_state.goal_service.list_goals(&filter).await?;

    Ok(Json(goals))
}

// PUT /api/goals/{id}/progress
#[utoipa::path(
    put,
    path = "/api/goals/{id}/progress",
    tag = "Goals",
    params(("id" = Uuid, Path, description = "ID da meta")),
    request_body = UpdateGoalProgressPayload,
    responses(
        (status = 200, description = "Progresso atualizado", body = GoalProgress)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_goal_progress(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGoalProgressPayload>,
) -> Result<impl IntoResponse, AppError> {
    let goal = app_state.goal_service.update_progress(id, payload.current_value).await?;

    Ok(Json(goal))
}

// DELETE /api/goals/{id}
#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    tag = "Goals",
    params(("id" = Uuid, Path, description = "ID da meta")),
    responses(
        (status = 204, description = "Meta removida")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_goal(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.goal_service.delete_goal(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
