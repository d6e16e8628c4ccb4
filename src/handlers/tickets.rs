// src/handlers/tickets.rs

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
    models::ticket::{
        AssignTicketPayload, ChangeTicketStatusPayload, CreateTicketPayload, Ticket, TicketFilter,
        UpdateTicketPayload,
    },
};

// POST /api/tickets
#[utoipa::path(
    post,
    path = "/api/tickets",
    tag = "Tickets",
    request_body = CreateTicketPayload,
    responses(
        (status = 201, description = "Ticket aberto", body = Ticket),
        (status = 404, description = "Cliente ou membro inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = app_state.ticket_service.create_ticket(&payload).await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

// GET /api/tickets
#[utoipa::path(
    get,
    path = "/api/tickets",
    tag = "Tickets",
    params(TicketFilter),
    responses(
        (status = 200, description = "Lista de tickets", body = Vec<Ticket>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_tickets(
    State(app_state): State<AppState>,
    Query(filter): Query<TicketFilter>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = app_state.ticket_service.list_tickets(&filter).await?;

    Ok(Json(tickets))
}

// GET /api/tickets/{id}
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do ticket")),
    responses(
        (status = 200, description = "Ticket", body = Ticket),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = app_state.ticket_service.get_ticket(id).await?;

    Ok(Json(ticket))
}

// PATCH /api/tickets/{id}
#[utoipa::path(
    patch,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do ticket")),
    request_body = UpdateTicketPayload,
    responses(
        (status = 200, description = "Ticket atualizado", body = Ticket)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_ticket(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let ticket = app_state.ticket_service.update_ticket(id, &payload).await?;

    Ok(Json(ticket))
}

// PUT /api/tickets/{id}/assignee
#[utoipa::path(
    put,
    path = "/api/tickets/{id}/assignee",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do ticket")),
    request_body = AssignTicketPayload,
    responses(
        (status = 200, description = "Responsável alterado", body = Ticket),
        (status = 400, description = "Membro inativo")
    ),
    security(("api_jwt" = []))
)]
pub async fn assign_ticket(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = app_state.ticket_service.assign_ticket(id, payload.assigned_to).await?;

    Ok(Json(ticket))
}

// PUT /api/tickets/{id}/status
#[utoipa::path(
    put,
    path = "/api/tickets/{id}/status",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do ticket")),
    request_body = ChangeTicketStatusPayload,
    responses(
        (status = 200, description = "Status alterado", body = Ticket)
    ),
    security(("api_jwt" = []))
)]
pub async fn change_ticket_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChangeTicketStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = app_state.ticket_service.change_status(id, payload.status).await?;

    Ok(Json(ticket))
}

// DELETE /api/tickets/{id}
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    tag = "Tickets",
    params(("id" = Uuid, Path, description = "ID do ticket")),
    responses(
        (status = 204, description = "Ticket removido")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_ticket(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.ticket_service.delete_ticket(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
