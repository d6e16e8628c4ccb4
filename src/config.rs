// src/config.rs

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, str::FromStr, time::Duration};

use crate::{
    db::{
        ClientRepository, GoalRepository, KnowledgeRepository, NpsRepository, TeamRepository,
        TicketRepository, UserRepository,
    },
    services::{
        auth::AuthService, client_service::ClientService, dashboard_service::DashboardService,
        goal_service::GoalService, knowledge_service::KnowledgeService, nps_service::NpsService,
        team_service::TeamService, ticket_service::TicketService,
    },
};

/// Carrega `.env.local` e depois `.env`. Variáveis já definidas não são
/// sobrescritas, então `.env.local` ganha de `.env`.
pub fn load_env() {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
}

pub fn required_var(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{} deve ser definida", name))
}

pub fn var_or<T: FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} inválida ({}): {}", name, raw, e)),
        _ => Ok(default),
    }
}

/// Inicializa o logger. RUST_LOG controla o nível (padrão: info).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// =============================================================================
//  SERVIDOR
// =============================================================================

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            jwt_secret: required_var("JWT_SECRET")?,
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000".to_string())?,
            db_max_connections: var_or("DB_MAX_CONNECTIONS", 5)?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub ticket_service: TicketService,
    pub team_service: TeamService,
    pub goal_service: GoalService,
    pub knowledge_service: KnowledgeService,
    pub nps_service: NpsService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config.jwt_secret.clone()))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_pool(db_pool: PgPool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let ticket_repo = TicketRepository::new(db_pool.clone());
        let team_repo = TeamRepository::new(db_pool.clone());
        let goal_repo = GoalRepository::new(db_pool.clone());
        let knowledge_repo = KnowledgeRepository::new(db_pool.clone());
        let nps_repo = NpsRepository::new(db_pool.clone());

        Self {
            auth_service: AuthService::new(user_repo, jwt_secret, db_pool.clone()),
            client_service: ClientService::new(client_repo.clone(), db_pool.clone()),
            ticket_service: TicketService::new(
                ticket_repo.clone(),
                client_repo,
                team_repo.clone(),
                db_pool.clone(),
            ),
            team_service: TeamService::new(team_repo, db_pool.clone()),
            goal_service: GoalService::new(goal_repo.clone(), db_pool.clone()),
            knowledge_service: KnowledgeService::new(knowledge_repo),
            nps_service: NpsService::new(nps_repo.clone(), ticket_repo.clone(), db_pool.clone()),
            dashboard_service: DashboardService::new(ticket_repo, nps_repo, goal_repo, db_pool.clone()),
            db_pool,
        }
    }
}

// =============================================================================
//  SCRIPTS DE MIGRAÇÃO
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Dados de exemplo embutidos no binário
    Bundled,
    /// Lê tudo da API REST do BaaS Postgres
    Remote,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bundled" => Ok(SourceKind::Bundled),
            "remote" => Ok(SourceKind::Remote),
            other => Err(format!("origem desconhecida '{}' (use bundled ou remote)", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BaasEndpoint {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Só preenchido quando a origem é `remote`
    pub supabase: Option<BaasEndpoint>,
    pub xano: BaasEndpoint,
    pub xano_probe_table: String,
    pub source: SourceKind,
    /// Vazio = todas as tabelas conhecidas
    pub tables: Vec<String>,
    pub record_delay: Duration,
    pub retry_delay: Duration,
}

impl MigrationConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let tables = var_or("MIGRATION_TABLES", String::new())?
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let source = var_or("MIGRATION_SOURCE", SourceKind::Bundled)?;

        Ok(Self {
            supabase: source_endpoint(source)?,
            xano: xano_endpoint()?,
            xano_probe_table: xano_probe_table()?,
            source,
            tables,
            record_delay: Duration::from_millis(var_or("MIGRATION_DELAY_MS", 500)?),
            retry_delay: Duration::from_millis(var_or("MIGRATION_RETRY_DELAY_MS", 2000)?),
        })
    }
}

pub fn supabase_endpoint() -> anyhow::Result<BaasEndpoint> {
    Ok(BaasEndpoint {
        base_url: required_var("SUPABASE_URL")?,
        api_key: required_var("SUPABASE_ANON_KEY")?,
    })
}

/// Credenciais do BaaS Postgres, exigidas só quando ele é a origem.
pub fn source_endpoint(source: SourceKind) -> anyhow::Result<Option<BaasEndpoint>> {
    match source {
        SourceKind::Bundled => Ok(None),
        SourceKind::Remote => supabase_endpoint().map(Some),
    }
}

pub fn xano_probe_table() -> anyhow::Result<String> {
    var_or("XANO_PROBE_TABLE", "client".to_string())
}

pub fn xano_endpoint() -> anyhow::Result<BaasEndpoint> {
    Ok(BaasEndpoint {
        base_url: required_var("XANO_BASE_URL")?,
        api_key: required_var("XANO_API_KEY")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_source_kind() {
        assert_eq!("bundled".parse::<SourceKind>(), Ok(SourceKind::Bundled));
        assert_eq!("REMOTE".parse::<SourceKind>(), Ok(SourceKind::Remote));
        assert!("csv".parse::<SourceKind>().is_err());
    }

    #[test]
    fn bundled_source_needs_no_supabase_credentials() {
        assert!(source_endpoint(SourceKind::Bundled).unwrap().is_none());
    }

    #[test]
    fn missing_var_uses_default() {
        let value: u64 = var_or("ATENDIMENTO_TESTE_VAR_INEXISTENTE", 42).unwrap();
        assert_eq!(value, 42);
    }
}
