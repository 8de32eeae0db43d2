use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use travel_assistant::config::Config;
use travel_assistant::orchestrator::Orchestrator;
use travel_assistant::server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("travel_assistant=info".parse()?),
        )
        .init();

    info!("Starting travel assistant");

    // Load configuration from environment
    let config = Arc::new(Config::from_env()?);
    let port = config.port;

    if config.api_key.is_none() {
        info!("API_KEY not set, /analyze is open to any caller");
    }

    let state = AppState {
        orchestrator: Arc::new(Orchestrator::new(config)),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
