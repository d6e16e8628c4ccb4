// src/bin/diagnose.rs

//! Testa a conexão com os dois BaaS e mostra a latência de cada um.

use std::{process::ExitCode, time::Instant};

use atendimento_backend::{
    config,
    migration::{NoCodeClient, PostgrestClient, RecordSink},
};

async fn check(sink: &dyn RecordSink) -> bool {
    let started = Instant::now();
    let result = sink.probe().await;
    let elapsed = started.elapsed().as_millis();

    match result {
        Ok(()) => {
            println!("✅ {:<10} online ({} ms)", sink.name(), elapsed);
            true
        }
        Err(e) => {
            println!("❌ {:<10} falhou após {} ms: {}", sink.name(), elapsed, e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    config::load_env();
    config::init_tracing();

    let supabase = PostgrestClient::new(&config::supabase_endpoint()?);
    let xano = NoCodeClient::new(&config::xano_endpoint()?).with_probe_table(config::xano_probe_table()?);

    println!("=== Diagnóstico de conectividade ===");
    let supabase_ok = check(&supabase).await;
    let xano_ok = check(&xano).await;

    if supabase_ok && xano_ok {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
