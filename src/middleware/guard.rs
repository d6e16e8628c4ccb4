// src/middleware/guard.rs

//! Guard de rotas: existe sessão? o cargo está na lista exigida?
//! Não consulta a hierarquia de cargos; a lista é literal.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    config::AppState,
    middleware::auth::{resolve_user, AuthenticatedUser},
    models::auth::{Role, User},
};

pub const LOGIN_PATH: &str = "/login";
pub const FORBIDDEN_PATH: &str = "/403";

// Listas prontas usadas no roteamento
pub const ANY_ROLE: &[Role] = &[];
pub const STAFF: &[Role] = &[Role::Admin, Role::Manager, Role::Agent];
pub const MANAGERS: &[Role] = &[Role::Admin, Role::Manager];
pub const ADMINS: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self { user_id: user.id, role: user.role }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToForbidden,
}

impl GuardDecision {
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some(LOGIN_PATH),
            GuardDecision::RedirectToForbidden => Some(FORBIDDEN_PATH),
        }
    }
}

/// Lista vazia = basta estar logado.
pub fn evaluate(session: Option<&Session>, required: &[Role]) -> GuardDecision {
    match session {
        None => GuardDecision::RedirectToLogin,
        Some(s) if !required.is_empty() && !required.contains(&s.role) => {
            GuardDecision::RedirectToForbidden
        }
        Some(_) => GuardDecision::Allow,
    }
}

impl IntoResponse for GuardDecision {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            GuardDecision::Allow => return StatusCode::NO_CONTENT.into_response(),
            GuardDecision::RedirectToLogin => (StatusCode::UNAUTHORIZED, "Faça login para continuar."),
            GuardDecision::RedirectToForbidden => (StatusCode::FORBIDDEN, "Seu cargo não tem acesso a esta área."),
        };

        let body = Json(json!({
            "error": message,
            "redirect": self.redirect_path(),
        }));
        (status, body).into_response()
    }
}

// Estado do middleware: o AppState + os cargos exigidos por aquele grupo de rotas
#[derive(Clone)]
pub struct GuardState {
    pub app: AppState,
    pub required: &'static [Role],
}

impl GuardState {
    pub fn new(app: AppState, required: &'static [Role]) -> Self {
        Self { app, required }
    }
}

pub async fn route_guard(
    State(guard): State<GuardState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = match resolve_user(&guard.app, request.headers()).await {
        Ok(user) => user,
        // Banco fora do ar não é "sem sessão": vira 500, sem redirect
        Err(e) => return e.into_response(),
    };
    let session = user.as_ref().map(Session::from);

    let decision = evaluate(session.as_ref(), guard.required);
    if decision != GuardDecision::Allow {
        tracing::debug!("🚧 {} {} -> {:?}", request.method(), request.uri().path(), decision);
        return decision.into_response();
    }

    if let Some(user) = user {
        request.extensions_mut().insert(AuthenticatedUser(user));
    }
    next.run(request).await
}

/// Protege um method router com a lista de cargos exigida.
pub fn require_roles(
    route: MethodRouter<AppState>,
    app: &AppState,
    required: &'static [Role],
) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(GuardState::new(app.clone(), required), route_guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session { user_id: Uuid::new_v4(), role }
    }

    #[test]
    fn no_session_always_goes_to_login() {
        assert_eq!(evaluate(None, ANY_ROLE), GuardDecision::RedirectToLogin);
        assert_eq!(evaluate(None, ADMINS), GuardDecision::RedirectToLogin);
        assert_eq!(GuardDecision::RedirectToLogin.redirect_path(), Some("/login"));
    }

    #[test]
    fn role_outside_required_set_is_forbidden() {
        let s = session(Role::Agent);
        assert_eq!(evaluate(Some(&s), MANAGERS), GuardDecision::RedirectToForbidden);
        assert_eq!(GuardDecision::RedirectToForbidden.redirect_path(), Some("/403"));
    }

    #[test]
    fn allowed_role_passes() {
        let s = session(Role::Manager);
        assert_eq!(evaluate(Some(&s), MANAGERS), GuardDecision::Allow);
        assert_eq!(evaluate(Some(&s), ANY_ROLE), GuardDecision::Allow);
        assert_eq!(GuardDecision::Allow.redirect_path(), None);
    }

    #[test]
    fn hierarchy_is_not_consulted() {
        // Admin está acima de manager, mas a lista é literal
        let s = session(Role::Admin);
        assert_eq!(evaluate(Some(&s), &[Role::Manager]), GuardDecision::RedirectToForbidden);
    }

    #[test]
    fn denial_responses_carry_status() {
        assert_eq!(
            GuardDecision::RedirectToLogin.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GuardDecision::RedirectToForbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }
}
