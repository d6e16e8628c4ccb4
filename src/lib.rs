// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;

use axum::{
    routing::{delete, get, patch, post, put, MethodRouter},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    middleware::guard::{require_roles, ADMINS, ANY_ROLE, MANAGERS, STAFF},
};

/// Monta o router completo da API.
///
/// Cada método recebe sua própria lista de cargos: leitura costuma ser
/// liberada para qualquer sessão, escrita para a equipe e exclusões para
/// gestores.
pub fn app(state: AppState) -> Router {
    let s = &state;
    let logged = |r: MethodRouter<AppState>| require_roles(r, s, ANY_ROLE);
    let staff = |r: MethodRouter<AppState>| require_roles(r, s, STAFF);
    let managers = |r: MethodRouter<AppState>| require_roles(r, s, MANAGERS);
    let admins = |r: MethodRouter<AppState>| require_roles(r, s, ADMINS);

    // Rotas públicas
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route("/me", logged(get(handlers::auth::get_me)));

    let client_routes = Router::new()
        .route(
            "/",
            logged(get(handlers::clients::list_clients))
                .merge(staff(post(handlers::clients::create_client))),
        )
        .route(
            "/{id}",
            logged(get(handlers::clients::get_client))
                .merge(staff(patch(handlers::clients::update_client)))
                .merge(managers(delete(handlers::clients::delete_client))),
        );

    let ticket_routes = Router::new()
        .route(
            "/",
            logged(get(handlers::tickets::list_tickets))
                .merge(staff(post(handlers::tickets::create_ticket))),
        )
        .route(
            "/{id}",
            logged(get(handlers::tickets::get_ticket))
                .merge(staff(patch(handlers::tickets::update_ticket)))
                .merge(managers(delete(handlers::tickets::delete_ticket))),
        )
        .route("/{id}/assignee", staff(put(handlers::tickets::assign_ticket)))
        .route("/{id}/status", staff(put(handlers::tickets::change_ticket_status)));

    let team_routes = Router::new()
        .route(
            "/members",
            staff(get(handlers::team::list_members))
                .merge(managers(post(handlers::team::create_member))),
        )
        .route(
            "/members/{id}",
            staff(get(handlers::team::get_member))
                .merge(managers(patch(handlers::team::update_member)))
                .merge(managers(delete(handlers::team::deactivate_member))),
        )
        // Quem pode trocar para qual cargo é decidido no serviço
        .route("/members/{id}/role", managers(put(handlers::team::change_member_role)))
        .route(
            "/schedules",
            staff(get(handlers::team::list_schedules))
                .merge(managers(post(handlers::team::create_schedule))),
        )
        .route("/schedules/{id}", managers(delete(handlers::team::delete_schedule)))
        .route("/schedules/{id}/status", managers(put(handlers::team::change_schedule_status)));

    let goal_routes = Router::new()
        .route(
            "/",
            staff(get(handlers::goals::list_goals))
                .merge(managers(post(handlers::goals::create_goal))),
        )
        .route("/{id}", managers(delete(handlers::goals::delete_goal)))
        .route("/{id}/progress", managers(put(handlers::goals::update_goal_progress)));

    let knowledge_routes = Router::new()
        .route(
            "/",
            logged(get(handlers::knowledge::search_articles))
                .merge(staff(post(handlers::knowledge::create_article))),
        )
        .route(
            "/{id}",
            logged(get(handlers::knowledge::get_article))
                .merge(staff(patch(handlers::knowledge::update_article)))
                .merge(admins(delete(handlers::knowledge::delete_article))),
        )
        .route("/{id}/publish", managers(post(handlers::knowledge::publish_article)))
        .route("/{id}/archive", managers(post(handlers::knowledge::archive_article)));

    // A resposta da pesquisa chega sem login (link enviado ao cliente)
    let nps_routes = Router::new()
        .route(
            "/responses",
            post(handlers::nps::record_response).merge(managers(get(handlers::nps::list_responses))),
        )
        .route("/summary", managers(get(handlers::nps::get_summary)));

    let dashboard_routes = Router::new()
        .route("/summary", managers(get(handlers::dashboard::get_summary)));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/tickets", ticket_routes)
        .nest("/api/team", team_routes)
        .nest("/api/goals", goal_routes)
        .nest("/api/knowledge", knowledge_routes)
        .nest("/api/nps", nps_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
}
