//! Pure Ollama REST API client
//!
//! A minimal client for a local Ollama server with no domain-specific logic.
//! Supports non-streaming chat and listing installed models.
//!
//! # Example
//!
//! ```rust,ignore
//! use ollama_client::{ChatRequest, Message, OllamaClient};
//!
//! let client = OllamaClient::new()?;
//!
//! let response = client
//!     .chat(
//!         ChatRequest::new("llama3.2")
//!             .message(Message::system("Answer in one word."))
//!             .message(Message::user("Capital of France?")),
//!     )
//!     .await?;
//! println!("{}", response.content);
//! ```

pub mod error;
pub mod types;

pub use error::{OllamaError, Result};
pub use types::{ChatRequest, ChatResponse, Message};

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Pure Ollama API client.
#[derive(Clone)]
pub struct OllamaClient {
    http_client: Client,
    base_url: String,
}

impl OllamaClient {
    /// Create a client for the default local endpoint.
    pub fn new() -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| OllamaError::Config(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Set a custom base URL (remote Ollama host, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat completion.
    ///
    /// Sends the conversation with `stream: false` and returns the assistant
    /// message. An empty answer is an error.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, base_url = %self.base_url, "Ollama request failed");
                OllamaError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "Ollama API error");
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        let content = raw
            .message
            .map(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| OllamaError::EmptyResponse(request.model.clone()))?;

        debug!(
            model = %request.model,
            duration_ms = start.elapsed().as_millis(),
            "Ollama chat completion"
        );

        Ok(ChatResponse {
            model: if raw.model.is_empty() {
                request.model
            } else {
                raw.model
            },
            content,
        })
    }

    /// Names of the models installed on the Ollama host.
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| OllamaError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let tags: types::TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = OllamaClient::new()
            .unwrap()
            .with_base_url("http://gpu-box:11434/");

        assert_eq!(client.base_url(), "http://gpu-box:11434");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = OllamaClient::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9");

        let err = client
            .chat(ChatRequest::new("llama3.2").message(Message::user("hi")))
            .await
            .unwrap_err();

        assert!(matches!(err, OllamaError::Network(_)));
    }
}
