// src/bin/bootstrap_admin.rs

//! Cria o primeiro administrador no auth dos dois BaaS e, se houver DATABASE_URL, no banco local.

use std::{env, process::ExitCode};

use anyhow::{bail, Context};
use atendimento_backend::{
    common::validation::validate_email,
    config::{self, required_var, var_or, AppState},
    migration::{NoCodeClient, PostgrestClient, SinkError},
    models::auth::Role,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;

/// `true` quando o passo pode ser considerado concluído.
fn report(backend: &str, result: Result<Value, SinkError>) -> bool {
    match result {
        Ok(_) => {
            println!("✅ {}: administrador cadastrado", backend);
            true
        }
        // Conta já existente volta como 4xx; não impede o resto
        Err(SinkError::Rejected { status, body }) if (400..500).contains(&status) => {
            println!("⚠️  {}: cadastro recusado (HTTP {}), provavelmente já existe: {}", backend, status, body);
            true
        }
        Err(e) => {
            println!("❌ {}: {}", backend, e);
            false
        }
    }
}

/// Com DATABASE_URL definida, cria também o admin no banco do próprio backend.
/// Só cria se ainda não houver nenhum admin.
async fn bootstrap_local(database_url: &str, email: &str, password: &str, name: &str) -> anyhow::Result<bool> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;
    sqlx::migrate!().run(&pool).await.context("Falha ao rodar as migrações")?;

    let state = AppState::from_pool(pool, required_var("JWT_SECRET")?);

    if state.auth_service.has_admin().await? {
        println!("⚠️  banco local: já existe um administrador, nada a fazer");
        return Ok(true);
    }

    match state.auth_service.create_user(email, password, name, Role::Admin).await {
        Ok(user) => {
            println!("✅ banco local: administrador {} criado", user.email);
            Ok(true)
        }
        Err(e) => {
            println!("❌ banco local: {}", e);
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    config::load_env();
    config::init_tracing();

    let email = required_var("BOOTSTRAP_ADMIN_EMAIL")?;
    let password = required_var("BOOTSTRAP_ADMIN_PASSWORD")?;
    let name = var_or("BOOTSTRAP_ADMIN_NAME", "Administrador".to_string())?;

    if !validate_email(&email) {
        bail!("BOOTSTRAP_ADMIN_EMAIL inválido: {}", email);
    }
    if password.chars().count() < 8 {
        bail!("BOOTSTRAP_ADMIN_PASSWORD deve ter pelo menos 8 caracteres");
    }

    let supabase = PostgrestClient::new(&config::supabase_endpoint()?);
    let xano = NoCodeClient::new(&config::xano_endpoint()?);

    let supabase_ok = report("supabase", supabase.sign_up(&email, &password, &name).await);
    let xano_ok = report("xano", xano.sign_up(&email, &password, &name).await);

    let local_ok = match env::var("DATABASE_URL") {
        Ok(url) => bootstrap_local(&url, &email, &password, &name).await?,
        Err(_) => true,
    };

    if supabase_ok && xano_ok && local_ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
