use async_trait::async_trait;
use ollama_client::{ChatRequest, Message, OllamaClient};

use crate::error::{LeadError, Result};
use crate::traits::BaseAI;

/// Ollama implementation of BaseAI, bound to one model.
#[derive(Clone)]
pub struct OllamaAI {
    client: OllamaClient,
    model: String,
}

impl OllamaAI {
    pub fn new(client: OllamaClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for OllamaAI {
    async fn complete_with_system(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(&self.model)
            .message(Message::system(system_prompt))
            .message(Message::user(prompt));

        self.client
            .chat(request)
            .await
            .map(|response| response.content)
            .map_err(|e| LeadError::Generation(Box::new(e)))
    }
}
