//! Ollama API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat
// =============================================================================

/// Chat request for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use (e.g., "llama3.2", "mistral")
    pub model: String,

    /// Conversation messages
    pub messages: Vec<Message>,

    /// Always false: the client reads a single response object
    pub stream: bool,
}

impl ChatRequest {
    /// Create a new chat request with the given model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            stream: false,
        }
    }

    /// Add a message to the conversation.
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    #[serde(default)]
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Model that answered
    pub model: String,

    /// Response content
    pub content: String,
}

/// Raw chat response from API (for internal parsing).
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseRaw {
    #[serde(default)]
    pub model: String,
    pub message: Option<Message>,
}

// =============================================================================
// Models
// =============================================================================

/// Raw response from `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelTag {
    pub name: String,
}
