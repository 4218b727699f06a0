use axum::{extract::Extension, Json};
use lead_agent::MODEL_OPTIONS;
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub default: String,
    pub models: Vec<String>,
}

/// Selectable generation models
///
/// The fixed options come first, followed by anything else the model server
/// reports as installed. An unreachable model server only means no extras.
pub async fn models_handler(Extension(state): Extension<AppState>) -> Json<ModelsResponse> {
    let installed = match state.ollama.list_models().await {
        Ok(models) => models,
        Err(e) => {
            tracing::debug!(error = %e, "Could not list installed models");
            Vec::new()
        }
    };

    Json(ModelsResponse {
        default: state.config.default_model.clone(),
        models: merge_models(&state.config.default_model, installed),
    })
}

fn merge_models(default_model: &str, installed: Vec<String>) -> Vec<String> {
    let mut models: Vec<String> = Vec::new();
    let candidates = std::iter::once(default_model.to_string())
        .chain(MODEL_OPTIONS.iter().map(|m| m.to_string()))
        .chain(installed);

    for model in candidates {
        if !models.contains(&model) {
            models.push(model);
        }
    }
    models
}
