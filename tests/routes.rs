// tests/routes.rs

//! Router completo servido localmente. O pool é preguiçoso: nenhuma rota
//! testada aqui chega ao banco.

use std::time::Duration;

use atendimento_backend::{
    config::AppState,
    models::auth::{Claims, Role},
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

const SECRET: &str = "segredo-de-teste";

async fn spawn_app() -> String {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .unwrap();
    spawn_with_pool(pool).await
}

async fn spawn_with_pool(pool: PgPool) -> String {
    let app = atendimento_backend::app(AppState::from_pool(pool, SECRET.into()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn health_is_public() {
    let base = spawn_app().await;

    let response = reqwest::get(format!("{}/api/health", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn protected_routes_redirect_to_login_without_session() {
    let base = spawn_app().await;
    let http = reqwest::Client::new();

    for path in ["/api/users/me", "/api/clients", "/api/team/members", "/api/dashboard/summary"] {
        let response = http.get(format!("{}{}", base, path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", path);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["redirect"], "/login", "{}", path);
    }
}

#[tokio::test]
async fn malformed_token_counts_as_no_session() {
    let base = spawn_app().await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/tickets", base))
        .bearer_auth("nao-e-um-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let base = spawn_app().await;

    let doc: Value = reqwest::get(format!("{}/api-docs/openapi.json", base))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/api/tickets/{id}/status"].is_object());
    assert!(doc["components"]["securitySchemes"]["api_jwt"].is_object());
}

fn signed_token(role: Role) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: Uuid::new_v4(),
        role,
        exp: (now + chrono::Duration::days(1)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_ref())).unwrap()
}

#[tokio::test]
async fn database_outage_is_a_server_error_not_a_logout() {
    // Porta 1 recusa conexão: o token é válido, mas o usuário não pode ser carregado
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://postgres@127.0.0.1:1/atendimento")
        .unwrap();
    let base = spawn_with_pool(pool).await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/users/me", base))
        .bearer_auth(signed_token(Role::Manager))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert!(body.get("redirect").is_none());
}
