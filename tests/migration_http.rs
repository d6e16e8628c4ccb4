// tests/migration_http.rs

//! Clientes de migração contra um servidor axum local que imita os dois BaaS.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use atendimento_backend::{
    config::BaasEndpoint,
    migration::{
        BundledSource, MigrationRunner, NoCodeClient, PostgrestClient, RecordSink, RecordSource,
        RunnerConfig, SinkError, TableMapping,
    },
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn endpoint(base_url: &str, api_key: &str) -> BaasEndpoint {
    BaasEndpoint { base_url: base_url.to_string(), api_key: api_key.to_string() }
}

// =============================================================================
//  BACKEND NO-CODE FALSO
// =============================================================================

#[derive(Clone, Default)]
struct FakeNoCode {
    posts: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Value>>>,
}

fn authorized(headers: &HeaderMap, key: &str) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", key))
}

async fn list_client(headers: HeaderMap) -> Response {
    if !authorized(&headers, "xano-key") {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([])).into_response()
}

// Primeira chamada estoura o limite, as seguintes entram
async fn insert_client(State(fake): State<FakeNoCode>, Json(body): Json<Value>) -> StatusCode {
    if fake.posts.fetch_add(1, Ordering::SeqCst) == 0 {
        return StatusCode::TOO_MANY_REQUESTS;
    }
    fake.received.lock().unwrap().push(body);
    StatusCode::CREATED
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["email"] == "existente@example.com" {
        return (StatusCode::BAD_REQUEST, "Duplicate record detected").into_response();
    }
    Json(json!({ "authToken": "t" })).into_response()
}

fn no_code_app(fake: FakeNoCode) -> Router {
    Router::new()
        .route("/client", get(list_client).post(insert_client))
        .route("/auth/signup", post(signup))
        .route("/restrito", get(|| async { StatusCode::FORBIDDEN }))
        .with_state(fake)
}

#[tokio::test]
async fn runner_retries_rate_limit_and_skips_missing_table() {
    let fake = FakeNoCode::default();
    let base = spawn(no_code_app(fake.clone())).await;
    let sink = NoCodeClient::new(&endpoint(&base, "xano-key"));

    let source = BundledSource::new(HashMap::from([
        (
            "clients".to_string(),
            vec![
                json!({ "id": "1", "name": "Mariana", "document": "52998224725" }),
                json!({ "id": "2", "name": "Padaria", "document": "11222333000181" }),
            ],
        ),
        ("goals".to_string(), vec![json!({ "id": "9", "title": "Meta" })]),
    ]));
    let config = RunnerConfig {
        record_delay: Duration::ZERO,
        retry_delay: Duration::from_millis(10),
    };
    let runner = MigrationRunner::new(&source, &sink, config);

    runner.probe().await.unwrap();
    let report = runner
        .run(&[TableMapping::new("clients", "client"), TableMapping::new("goals", "goal")])
        .await;

    assert_eq!(fake.posts.load(Ordering::SeqCst), 3);
    assert_eq!(report.inserted(), 2);
    assert!(!report.has_failures());
    assert_eq!(report.skipped_tables(), vec!["goals"]);

    let received = fake.received.lock().unwrap().clone();
    assert_eq!(received[0], json!({ "name": "Mariana", "document": "52998224725" }));
    assert!(received.iter().all(|r| r.get("id").is_none()));
}

#[tokio::test]
async fn no_code_probe_rejects_bad_key() {
    let base = spawn(no_code_app(FakeNoCode::default())).await;

    let good = NoCodeClient::new(&endpoint(&base, "xano-key"));
    let bad = NoCodeClient::new(&endpoint(&base, "errada"));

    assert!(good.probe().await.is_ok());
    assert!(matches!(bad.probe().await, Err(SinkError::Rejected { status: 401, .. })));
}

#[tokio::test]
async fn no_code_probe_uses_configured_table() {
    let base = spawn(no_code_app(FakeNoCode::default())).await;
    let client = NoCodeClient::new(&endpoint(&base, "xano-key"));

    assert!(client.probe().await.is_ok());
    let restricted = client.with_probe_table("restrito");
    assert!(matches!(restricted.probe().await, Err(SinkError::Rejected { status: 403, .. })));
}

#[tokio::test]
async fn no_code_sign_up_reports_duplicate_as_rejected() {
    let base = spawn(no_code_app(FakeNoCode::default())).await;
    let client = NoCodeClient::new(&endpoint(&base, "xano-key"));

    let created = client.sign_up("novo@example.com", "senha-forte", "Admin").await.unwrap();
    assert_eq!(created["authToken"], "t");

    match client.sign_up("existente@example.com", "senha-forte", "Admin").await {
        Err(SinkError::Rejected { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("Duplicate"));
        }
        other => panic!("esperava Rejected, veio {:?}", other),
    }
}

// =============================================================================
//  BaaS POSTGRES FALSO
// =============================================================================

fn has_api_key(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some("anon") && authorized(headers, "anon")
}

async fn rest_root(headers: HeaderMap) -> StatusCode {
    if has_api_key(&headers) { StatusCode::OK } else { StatusCode::UNAUTHORIZED }
}

async fn select_clients(headers: HeaderMap) -> Response {
    if !has_api_key(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!([
        { "id": "a", "name": "Mariana", "created_at": "2024-01-01T00:00:00Z" },
        { "id": "b", "name": "Ricardo", "created_at": "2024-01-02T00:00:00Z" }
    ]))
    .into_response()
}

async fn insert_ticket(headers: HeaderMap) -> Response {
    assert_eq!(headers.get("prefer").and_then(|v| v.to_str().ok()), Some("return=minimal"));
    (StatusCode::BAD_REQUEST, r#"{"message":"null value in column \"client_id\""}"#).into_response()
}

fn postgrest_app() -> Router {
    Router::new()
        .route("/rest/v1/", get(rest_root))
        .route("/rest/v1/clients", get(select_clients))
        .route("/rest/v1/tickets", post(insert_ticket))
}

#[tokio::test]
async fn postgrest_reads_tables_and_classifies_errors() {
    let base = spawn(postgrest_app()).await;
    let client = PostgrestClient::new(&endpoint(&base, "anon"));

    client.probe().await.unwrap();

    let rows = client.fetch_all("clients").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["name"], "Ricardo");

    assert!(matches!(client.fetch_all("pedidos").await, Err(SinkError::NotFound)));

    match client.insert("tickets", &json!({ "title": "sem cliente" })).await {
        Err(SinkError::Rejected { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("client_id"));
        }
        other => panic!("esperava Rejected, veio {:?}", other),
    }
}

#[tokio::test]
async fn postgrest_probe_fails_without_key() {
    let base = spawn(postgrest_app()).await;
    let client = PostgrestClient::new(&endpoint(&base, "outra"));

    assert!(client.probe().await.is_err());
}

#[tokio::test]
async fn remote_source_is_checked_before_migrating() {
    let sink_base = spawn(no_code_app(FakeNoCode::default())).await;
    let source_base = spawn(postgrest_app()).await;
    let sink = NoCodeClient::new(&endpoint(&sink_base, "xano-key"));

    let good = PostgrestClient::new(&endpoint(&source_base, "anon"));
    let runner = MigrationRunner::new(&good, &sink, RunnerConfig::default());
    assert!(runner.probe_source().await.is_ok());

    // Destino ok, origem recusando a chave: a migração não deve começar
    let bad = PostgrestClient::new(&endpoint(&source_base, "outra"));
    let runner = MigrationRunner::new(&bad, &sink, RunnerConfig::default());
    assert!(runner.probe().await.is_ok());
    assert!(matches!(runner.probe_source().await, Err(SinkError::Rejected { status: 401, .. })));
}
