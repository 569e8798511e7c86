use anyhow::Context;
use tracing_subscriber::EnvFilter;

use pdf_summarizer::config::AppConfig;
use pdf_summarizer::routes;
use pdf_summarizer::services::llm_provider;
use pdf_summarizer::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded (env: {})", std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into()));

    let client = llm_provider::build_completion_service(&config.llm)
        .context("Failed to create completion client")?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::router(AppState::new(config, client));

    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
