// src/bin/migrate.rs

//! Copia os dados para o backend no-code, tabela a tabela.
//!
//! Origem: amostras embutidas (padrão) ou a API REST do BaaS Postgres
//! (`MIGRATION_SOURCE=remote`). Rodar duas vezes duplica os registros.

use std::process::ExitCode;

use anyhow::Context;
use atendimento_backend::{
    config::{self, MigrationConfig},
    migration::{
        select_mappings, BundledSource, MigrationRunner, NoCodeClient, PostgrestClient, RecordSink,
        RecordSource, RunnerConfig,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    config::load_env();
    config::init_tracing();

    let config = MigrationConfig::from_env()?;
    let mappings = select_mappings(&config.tables)
        .map_err(anyhow::Error::msg)
        .context("MIGRATION_TABLES inválida")?;

    let remote = config.supabase.as_ref().map(PostgrestClient::new);
    let bundled = BundledSource::default();
    // `supabase` só vem preenchido com MIGRATION_SOURCE=remote
    let source: &dyn RecordSource = match &remote {
        Some(client) => client,
        None => &bundled,
    };
    let sink = NoCodeClient::new(&config.xano).with_probe_table(config.xano_probe_table.as_str());

    let runner = MigrationRunner::new(source, &sink, RunnerConfig::from(&config));

    if let Some(client) = &remote {
        tracing::info!("🔌 Testando leitura em {}...", client.name());
        if let Err(e) = runner.probe_source().await {
            tracing::error!("❌ {} inacessível: {}", client.name(), e);
            return Ok(ExitCode::FAILURE);
        }
    }

    tracing::info!("🔌 Testando conexão com {}...", sink.name());
    if let Err(e) = runner.probe().await {
        tracing::error!("❌ {} inacessível: {}", sink.name(), e);
        return Ok(ExitCode::FAILURE);
    }

    let report = runner.run(&mappings).await;
    println!("{}", report.render());

    // Falhas por registro não mudam o código de saída
    Ok(ExitCode::SUCCESS)
}
