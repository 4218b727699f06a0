//! Error types for the Firecrawl client.

use thiserror::Error;

/// Result type for Firecrawl client operations.
pub type Result<T> = std::result::Result<T, FirecrawlError>;

/// Firecrawl client errors.
#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// Configuration error (client could not be built)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// An asynchronous extract job ended in a terminal non-success state
    #[error("Extract job {id} ended with status {status}")]
    JobFailed { id: String, status: String },

    /// Polling an extract job exceeded its time budget
    #[error("Extract job {id} did not finish within {secs}s")]
    Timeout { id: String, secs: u64 },
}

impl From<reqwest::Error> for FirecrawlError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FirecrawlError::Parse(err.to_string())
        } else {
            FirecrawlError::Network(err.to_string())
        }
    }
}
