//! Typed errors for the lead pipeline.
//!
//! Only `InvalidInput` and `Generation` ever stop a run. Search and
//! extraction errors are produced by the service adapters and absorbed by
//! the searcher and extractor.

use thiserror::Error;

/// Errors that can occur while producing leads.
#[derive(Debug, Error)]
pub enum LeadError {
    /// Operator input failed validation before the pipeline started
    #[error("{reason}")]
    InvalidInput { reason: String },

    /// Text generation service unavailable or failed
    #[error("generation service error: {0}")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Search service failed or reported no success
    #[error("search service error: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Extraction service failed for a page
    #[error("extraction service error: {0}")]
    Extraction(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Tabular export failed
    #[error("export error: {0}")]
    Export(#[from] csv::Error),
}

impl LeadError {
    /// Build an `InvalidInput` error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        LeadError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Build a `Generation` error from a message.
    pub fn generation(message: impl Into<String>) -> Self {
        LeadError::Generation(message.into().into())
    }

    /// Build a `Search` error from a message.
    pub fn search(message: impl Into<String>) -> Self {
        LeadError::Search(message.into().into())
    }

    /// Build an `Extraction` error from a message.
    pub fn extraction(message: impl Into<String>) -> Self {
        LeadError::Extraction(message.into().into())
    }
}

/// Result type alias for lead operations.
pub type Result<T> = std::result::Result<T, LeadError>;
