//! Taskdeck server entry point.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskdeck::adapters::http::{AppState, HttpServer};
use taskdeck::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ConfigLoader::load()?;

    tracing::info!(
        port = config.server.port,
        auth = if config.auth.enabled { "enforced" } else { "bypassed" },
        public_url = %config.server.public_url,
        "starting taskdeck"
    );

    let state = Arc::new(AppState::new(config));
    HttpServer::new(state)
        .serve_with_shutdown(shutdown_signal())
        .await
}

/// Resolves when SIGINT (ctrl-c) is received.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to install ctrl-c handler");
    }
    tracing::info!("shutdown signal received");
}
