// src/migration/client.rs

//! Clientes HTTP dos dois BaaS: o Postgres (API REST estilo PostgREST + auth)
//! e o backend no-code (CRUD por tabela + auth).

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::BaasEndpoint;

/// Erros por registro, classificados só pelo status HTTP.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("limite de requisições atingido (HTTP 429)")]
    RateLimited,

    #[error("tabela ou endpoint inexistente (HTTP 404)")]
    NotFound,

    #[error("HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("falha de rede: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Destino da migração: recebe um registro por vez.
#[async_trait]
pub trait RecordSink: Send + Sync {
    fn name(&self) -> &str;

    /// Testa a conexão antes de começar. Falha aqui aborta a execução.
    async fn probe(&self) -> Result<(), SinkError>;

    async fn insert(&self, table: &str, record: &Value) -> Result<(), SinkError>;
}

/// Origem da migração: devolve a tabela inteira de uma vez.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Testa a leitura antes de começar. Origem local está sempre pronta.
    async fn ready(&self) -> Result<(), SinkError> {
        Ok(())
    }

    async fn fetch_all(&self, table: &str) -> Result<Vec<Value>, SinkError>;
}

/// Converte a resposta em erro classificado quando o status não é 2xx.
pub async fn check_status(response: Response) -> Result<Response, SinkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(SinkError::RateLimited),
        StatusCode::NOT_FOUND => Err(SinkError::NotFound),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(SinkError::Rejected { status: status.as_u16(), body: truncate(&body, 300) })
        }
    }
}

/// Regra do probe: qualquer resposta serve como "online", menos erro de
/// credencial (401/403) e erro do servidor (5xx).
pub fn probe_outcome(status: StatusCode) -> Result<(), SinkError> {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN || status.is_server_error() {
        return Err(SinkError::Rejected {
            status: status.as_u16(),
            body: "probe de conectividade recusado".into(),
        });
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut)
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

// =============================================================================
//  BaaS POSTGRES (REST + AUTH)
// =============================================================================

#[derive(Clone)]
pub struct PostgrestClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl PostgrestClient {
    pub fn new(endpoint: &BaasEndpoint) -> Self {
        Self {
            base_url: trim_base(&endpoint.base_url),
            api_key: endpoint.api_key.clone(),
            http: reqwest::Client::new(),
        }
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Cadastro no auth do BaaS. O nome vai nos metadados do usuário.
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Value, SinkError> {
        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name, "role": "admin" }
        });

        let response = self
            .request(reqwest::Method::POST, format!("{}/auth/v1/signup", self.base_url))
            .json(&body)
            .send()
            .await?;

        Ok(check_status(response).await?.json::<Value>().await?)
    }
}

#[async_trait]
impl RecordSink for PostgrestClient {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn probe(&self) -> Result<(), SinkError> {
        let response = self
            .request(reqwest::Method::GET, format!("{}/rest/v1/", self.base_url))
            .send()
            .await?;
        probe_outcome(response.status())
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<(), SinkError> {
        let response = self
            .request(reqwest::Method::POST, self.rest_url(table))
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordSource for PostgrestClient {
    async fn ready(&self) -> Result<(), SinkError> {
        RecordSink::probe(self).await
    }

    async fn fetch_all(&self, table: &str) -> Result<Vec<Value>, SinkError> {
        let response = self
            .request(reqwest::Method::GET, format!("{}?select=*", self.rest_url(table)))
            .send()
            .await?;

        Ok(check_status(response).await?.json::<Vec<Value>>().await?)
    }
}

// =============================================================================
//  BACKEND NO-CODE (CRUD POR TABELA + AUTH)
// =============================================================================

#[derive(Clone)]
pub struct NoCodeClient {
    base_url: String,
    api_key: String,
    probe_table: String,
    http: reqwest::Client,
}

impl NoCodeClient {
    pub fn new(endpoint: &BaasEndpoint) -> Self {
        Self {
            base_url: trim_base(&endpoint.base_url),
            api_key: endpoint.api_key.clone(),
            probe_table: "client".into(),
            http: reqwest::Client::new(),
        }
    }

    /// Tabela usada no probe (GET de listagem). Padrão: `client`.
    pub fn with_probe_table(mut self, table: impl Into<String>) -> Self {
        self.probe_table = table.into();
        self
    }

    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Value, SinkError> {
        let body = json!({
            "name": full_name,
            "email": email,
            "password": password,
        });

        let response = self
            .http
            .post(format!("{}/auth/signup", self.base_url))
            .json(&body)
            .send()
            .await?;

        Ok(check_status(response).await?.json::<Value>().await?)
    }
}

#[async_trait]
impl RecordSink for NoCodeClient {
    fn name(&self) -> &str {
        "xano"
    }

    async fn probe(&self) -> Result<(), SinkError> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, self.probe_table))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        probe_outcome(response.status())
    }

    async fn insert(&self, table: &str, record: &Value) -> Result<(), SinkError> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, table))
            .bearer_auth(&self.api_key)
            .json(record)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_accepts_client_errors_other_than_auth() {
        assert!(probe_outcome(StatusCode::OK).is_ok());
        assert!(probe_outcome(StatusCode::NOT_FOUND).is_ok());
        assert!(probe_outcome(StatusCode::UNAUTHORIZED).is_err());
        assert!(probe_outcome(StatusCode::FORBIDDEN).is_err());
        assert!(probe_outcome(StatusCode::BAD_GATEWAY).is_err());
    }

    #[test]
    fn trims_trailing_slash() {
        let client = PostgrestClient::new(&BaasEndpoint {
            base_url: "https://abc.supabase.co/".into(),
            api_key: "k".into(),
        });
        assert_eq!(client.rest_url("clients"), "https://abc.supabase.co/rest/v1/clients");
    }

    #[test]
    fn truncates_long_bodies() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 3), "abc…");
    }
}
