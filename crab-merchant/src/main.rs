//! crab-merchant: merchant resource API
//!
//! Long-running HTTP service serving tenant-scoped CRUD for kitchen devices,
//! marketing automations, online ordering records, QR codes and tip pools.

use crab_merchant::utils::logger;
use crab_merchant::{AppState, Config, api};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    logger::init_logger(&config.log_level, config.log_json, config.log_dir.as_deref());

    tracing::info!("Starting crab-merchant (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    tracing::info!(backend = state.gateway.backend_name(), "Gateway ready");

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("crab-merchant HTTP listening on {http_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("crab-merchant stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
