// Mock services for testing
//
// Each mock records its calls and shares state across clones, so a test can
// hand a clone to a pipeline component and inspect the calls afterwards.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{LeadError, Result};
use crate::traits::{BaseAI, BaseExtractionService, BaseSearchService};

// =============================================================================
// Mock AI
// =============================================================================

/// Arguments captured from a completion call
#[derive(Debug, Clone)]
pub struct MockAICall {
    pub system_prompt: String,
    pub prompt: String,
}

#[derive(Clone)]
pub struct MockAI {
    response: Arc<Mutex<std::result::Result<String, String>>>,
    calls: Arc<Mutex<Vec<MockAICall>>>,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok("mock search phrase".to_string()))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return this text from every completion
    pub fn with_response(self, response: &str) -> Self {
        *self.response.lock().unwrap() = Ok(response.to_string());
        self
    }

    /// Fail every completion with this message
    pub fn failing(self, message: &str) -> Self {
        *self.response.lock().unwrap() = Err(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<MockAICall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete_with_system(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        self.calls.lock().unwrap().push(MockAICall {
            system_prompt: system_prompt.to_string(),
            prompt: prompt.to_string(),
        });

        self.response
            .lock()
            .unwrap()
            .clone()
            .map_err(LeadError::generation)
    }
}

// =============================================================================
// Mock Search Service
// =============================================================================

#[derive(Clone)]
pub struct MockSearchService {
    urls: Arc<Mutex<Vec<String>>>,
    error: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockSearchService {
    pub fn new() -> Self {
        Self {
            urls: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// URLs returned by every search, untruncated
    pub fn with_urls(self, urls: Vec<String>) -> Self {
        *self.urls.lock().unwrap() = urls;
        self
    }

    pub fn failing(self, message: &str) -> Self {
        *self.error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// (query, limit) for every search
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockSearchService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSearchService for MockSearchService {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push((query.to_string(), limit));

        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(LeadError::search(message));
        }
        Ok(self.urls.lock().unwrap().clone())
    }
}

// =============================================================================
// Mock Extraction Service
// =============================================================================

/// Arguments captured from an extract call
#[derive(Debug, Clone)]
pub struct MockExtractCall {
    pub url: String,
    pub prompt: String,
    pub schema: Value,
}

#[derive(Clone)]
pub struct MockExtractionService {
    responses: Arc<Mutex<HashMap<String, std::result::Result<Value, String>>>>,
    calls: Arc<Mutex<Vec<MockExtractCall>>>,
}

impl MockExtractionService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Raw response for one URL
    pub fn with_response(self, url: &str, response: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(response));
        self
    }

    /// Fail extraction of one URL
    pub fn with_error(self, url: &str, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<MockExtractCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_extracted(&self, url: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c.url == url)
    }
}

impl Default for MockExtractionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseExtractionService for MockExtractionService {
    async fn extract(&self, url: &str, prompt: &str, schema: &Value) -> Result<Value> {
        self.calls.lock().unwrap().push(MockExtractCall {
            url: url.to_string(),
            prompt: prompt.to_string(),
            schema: schema.clone(),
        });

        // Unknown URLs get a successful response with nothing in it
        match self.responses.lock().unwrap().get(url) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(LeadError::extraction(message.clone())),
            None => Ok(json!({"success": true, "data": {}})),
        }
    }
}
