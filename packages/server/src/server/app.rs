//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use ollama_client::OllamaClient;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::routes::{csv_handler, health_handler, leads_handler, models_handler};

/// Shared application state
///
/// Holds only configuration and the model-server client. Search and
/// extraction clients carry the operator's key and are built per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ollama: OllamaClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let ollama = OllamaClient::new()
            .context("Failed to create Ollama client")?
            .with_base_url(&config.ollama_base_url);

        Ok(Self {
            config: Arc::new(config),
            ollama,
        })
    }
}

/// Build the Axum application router
pub fn build_app(config: Config) -> Result<Router> {
    let cors = cors_layer(&config.allowed_origins);
    let app_state = AppState::new(config)?;

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/models", get(models_handler))
        .route("/api/leads", post(leads_handler))
        .route("/api/leads/csv", post(csv_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    // No configured origins - allow any origin for development
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}
