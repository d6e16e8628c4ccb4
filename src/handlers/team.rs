// src/handlers/team.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::team::{
        ChangeRolePayload, ChangeScheduleStatusPayload, CreateSchedulePayload, CreateTeamMemberPayload,
        Schedule, ScheduleFilter, TeamMember, UpdateTeamMemberPayload,
    },
};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MemberListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

// =============================================================================
//  MEMBROS
// =============================================================================

// POST /api/team/members
#[utoipa::path(
    post,
    path = "/api/team/members",
    tag = "Team",
    request_body = CreateTeamMemberPayload,
    responses(
        (status = 201, description = "Membro criado", body = TeamMember),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_member(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTeamMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let member = app_state.team_service.create_member(&payload).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

// GET /api/team/members
#[utoipa::path(
    get,
    path = "/api/team/members",
    tag = "Team",
    params(MemberListQuery),
    responses(
        (status = 200, description = "Membros da equipe", body = Vec<TeamMember>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
    Query(query): Query<MemberListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let members = app_state.team_service.list_members(query.include_inactive).await?;

    Ok(Json(members))
}

// GET /api/team/members/{id}
#[utoipa::path(
    get,
    path = "/api/team/members/{id}",
    tag = "Team",
    params(("id" = Uuid, Path, description = "ID do membro")),
    responses(
        (status = 200, description = "Membro", body = TeamMember),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_member(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let member = app_state.team_service.get_member(id).await?;

    Ok(Json(member))
}

// PATCH /api/team/members/{id}
#[utoipa::path(
    patch,
    path = "/api/team/members/{id}",
    tag = "Team",
    params(("id" = Uuid, Path, description = "ID do membro")),
    request_body = UpdateTeamMemberPayload,
    responses(
        (status = 200, description = "Membro atualizado", body = TeamMember)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_member(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTeamMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let member = app_state.team_service.update_member(id, &payload).await?;

    Ok(Json(member))
}

// PUT /api/team/members/{id}/role
#[utoipa::path(
    put,
    path = "/api/team/members/{id}/role",
    tag = "Team",
    params(("id" = Uuid, Path, description = "ID do membro")),
    request_body = ChangeRolePayload,
    responses(
        (status = 200, description = "Cargo alterado", body = TeamMember),
        (status = 403, description = "Cargo do solicitante não permite a troca")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_member_role(
    State(app_state): State<AppState>,
    AuthenticatedUser(actor): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeRolePayload>,
) -> Result<impl IntoResponse, AppError> {
    let member = app_state.team_service.change_role(actor.role, id, payload.role).await?;

    Ok(Json(member))
}

// DELETE /api/team/members/{id}
#[utoipa::path(
    delete,
    path = "/api/team/members/{id}",
    tag = "Team",
    params(("id" = Uuid, Path, description = "ID do membro")),
    responses(
        (status = 200, description = "Membro desativado", body = TeamMember)
    ),
    security(("api_jwt" = []))
)]
pub async fn deactivate_member(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let member = app_state.team_service.deactivate_member(id).await?;

    Ok(Json(member))
}

// =============================================================================
//  ESCALAS
// =============================================================================

// POST /api/team/schedules
#[utoipa::path(
    post,
    path = "/api/team/schedules",
    tag = "Team",
    request_body = CreateSchedulePayload,
    responses(
        (status = 201, description = "Escala criada", body = Schedule),
        (status = 400, description = "Horário inválido ou membro inativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_schedule(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSchedulePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let schedule = app_state.team_service.create_schedule(&payload).await?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

// GET /api/team/schedules
#[utoipa::path(
    get,
    path = "/api/team/schedules",
    tag = "Team",
    params(ScheduleFilter),
    responses(
        (status = 200, description = "Escalas no período", body = Vec<Schedule>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_schedules(
    State(app_state): State<AppState>,
    Query(filter): Query<ScheduleFilter>,
) -> Result<impl IntoResponse, AppError> {
    let schedules = app_state.team_service.list_schedules(&filter).await?;

    Ok(Json(schedules))
}

// PUT /api/team/schedules/{id}/status
#[utoipa::path(
    put,
    path = "/api/team/schedules/{id}/status",
    tag = "Team",
    params(("id" = Uuid, Path, description = "ID da escala")),
    request_body = ChangeScheduleStatusPayload,
    responses(
        (status = 200, description = "Status da escala alterado", body = Schedule)
    ),
    security(("api_jwt" = []))
)]
pub async fn change_schedule_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeScheduleStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = app_state.team_service.set_schedule_status(id, payload.status).await?;

    Ok(Json(schedule))
}

// DELETE /api/team/schedules/{id}
#[utoipa::path(
    delete,
    path = "/api/team/schedules/{id}",
    tag = "Team",
    params(("id" = Uuid, Path, description = "ID da escala")),
    responses(
        (status = 204, description = "Escala removida")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_schedule(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.team_service.delete_schedule(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
