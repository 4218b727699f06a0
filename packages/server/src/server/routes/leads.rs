use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use lead_agent::{
    firecrawl_extractor, firecrawl_search, to_csv, FlattenedRow, LeadPipeline, LeadReport,
    LeadRequest, Narration, OllamaAI, RunOutcome, CSV_CONTENT_TYPE, CSV_FILE_NAME,
};
use serde::Serialize;
use uuid::Uuid;

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub search_phrase: String,
    pub urls: Vec<String>,
    pub rows: Vec<FlattenedRow>,
    pub narration: Vec<Narration>,
    pub outcome: RunOutcome,
    /// Present only when there are rows to export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,
}

/// Run the pipeline and return the table plus its CSV rendering
pub async fn leads_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<LeadRequest>,
) -> Result<Json<LeadsResponse>, ApiError> {
    let report = run_leads(&state, request).await?;

    let csv = if report.has_rows() {
        Some(to_csv(&report.rows)?)
    } else {
        None
    };

    Ok(Json(LeadsResponse {
        run_id: report.run_id,
        started_at: report.started_at,
        search_phrase: report.search_phrase,
        urls: report.urls,
        rows: report.rows,
        narration: report.narration,
        outcome: report.outcome,
        csv,
    }))
}

/// Run the pipeline and return only the CSV file
///
/// 204 No Content when the run produced no rows.
pub async fn csv_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<LeadRequest>,
) -> Result<Response, ApiError> {
    let report = run_leads(&state, request).await?;

    if !report.has_rows() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let body = to_csv(&report.rows)?;
    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}

/// Validate the request, wire a fresh pipeline for it and run it once.
async fn run_leads(state: &AppState, request: LeadRequest) -> Result<LeadReport, ApiError> {
    let input = request.validate(&state.config.default_model)?;
    let settings = state.config.firecrawl_settings();

    // Search and extraction clients are built independently; either one
    // failing degrades the run instead of failing the request.
    let search = firecrawl_search(&input.firecrawl_api_key, &settings);
    let extractor = firecrawl_extractor(&input.firecrawl_api_key, &settings);

    let ai = OllamaAI::new(state.ollama.clone(), input.model);
    tracing::info!(model = ai.model(), num_links = input.num_links, "Starting lead run");

    let pipeline = LeadPipeline::new(ai, search, extractor);
    Ok(pipeline.run(&input.query, input.num_links).await?)
}
