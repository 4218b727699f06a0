//! Error types for Ollama client.

use thiserror::Error;

/// Result type for Ollama client operations.
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Ollama client errors.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// Configuration error (client could not be built)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout, Ollama not running)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, unknown model)
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The model answered with no content
    #[error("Empty response from model {0}")]
    EmptyResponse(String),
}
