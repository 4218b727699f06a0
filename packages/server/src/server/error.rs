use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use lead_agent::LeadError;
use thiserror::Error;

/// Errors returned by the lead routes, rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Lead(#[from] LeadError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Lead(LeadError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Lead(LeadError::Generation(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Lead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Lead request failed");
        } else {
            tracing::debug!(error = %self, "Lead request rejected");
        }

        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
