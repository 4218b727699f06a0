// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The pipeline components (condenser, searcher, extractor) hold the business
// rules and talk to the outside world only through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseSearchService)

use async_trait::async_trait;

use crate::error::Result;

// =============================================================================
// AI Trait (Infrastructure - text generation)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt under a fixed instruction block (raw text response)
    async fn complete_with_system(&self, system_prompt: &str, prompt: &str) -> Result<String>;
}

// =============================================================================
// Search Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseSearchService: Send + Sync {
    /// Run one search and return result URLs in service order.
    ///
    /// Transport failures and responses without a success flag are errors;
    /// the caller decides how to degrade.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: BaseSearchService + ?Sized> BaseSearchService for Box<T> {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        (**self).search(query, limit).await
    }
}

// =============================================================================
// Extraction Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseExtractionService: Send + Sync {
    /// Extract structured data from one page.
    ///
    /// Returns the service's raw response; its shape is not guaranteed.
    async fn extract(
        &self,
        url: &str,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value>;
}
