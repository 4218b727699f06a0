// Main entry point for API server

use anyhow::{Context, Result};
use server_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server=debug,server_core=debug,lead_agent=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lead Generation Agent API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        ollama = %config.ollama_base_url,
        default_model = %config.default_model,
        "Configuration loaded"
    );

    let port = config.port;
    let app = build_app(config).context("Failed to build application")?;

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
