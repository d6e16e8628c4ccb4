//src/main.rs

use anyhow::Context;
use tokio::net::TcpListener;

use atendimento_backend::config::{self, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_env();
    config::init_tracing();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config)
        .await
        .context("Falha ao inicializar o estado da aplicação")?;

    // Aplica o schema em migrations/ antes de aceitar conexões
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .context("Falha ao rodar as migrações do banco de dados")?;

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = atendimento_backend::app(app_state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", config.bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;

    Ok(())
}
