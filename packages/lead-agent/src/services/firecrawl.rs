use async_trait::async_trait;
use firecrawl_client::{ExtractRequest, FirecrawlClient, SearchRequest};

use crate::error::{LeadError, Result};
use crate::security::SecretString;
use crate::traits::{BaseExtractionService, BaseSearchService};

/// Connection settings shared by the search and extraction adapters.
#[derive(Debug, Clone)]
pub struct FirecrawlSettings {
    /// `None` keeps the client's default endpoint
    pub base_url: Option<String>,
    pub poll_interval_secs: u64,
    pub poll_timeout_secs: u64,
}

impl Default for FirecrawlSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            poll_interval_secs: 2,
            poll_timeout_secs: 180,
        }
    }
}

fn build_client(
    api_key: &SecretString,
    settings: &FirecrawlSettings,
) -> firecrawl_client::Result<FirecrawlClient> {
    let mut client = FirecrawlClient::new(api_key.expose())?
        .with_poll_interval(settings.poll_interval_secs)
        .with_poll_timeout(settings.poll_timeout_secs);
    if let Some(base_url) = &settings.base_url {
        client = client.with_base_url(base_url);
    }
    Ok(client)
}

/// Firecrawl search implementation of BaseSearchService
pub struct FirecrawlSearch {
    client: FirecrawlClient,
}

impl FirecrawlSearch {
    pub fn new(api_key: &SecretString, settings: &FirecrawlSettings) -> Result<Self> {
        let client = build_client(api_key, settings).map_err(|e| LeadError::Search(Box::new(e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BaseSearchService for FirecrawlSearch {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<String>> {
        let response = self
            .client
            .search(&SearchRequest::new(query, limit))
            .await
            .map_err(|e| LeadError::Search(Box::new(e)))?;

        if !response.is_success() {
            return Err(LeadError::search("search response did not report success"));
        }

        Ok(response.urls())
    }
}

/// Firecrawl extract implementation of BaseExtractionService
pub struct FirecrawlExtraction {
    client: FirecrawlClient,
}

impl FirecrawlExtraction {
    pub fn new(api_key: &SecretString, settings: &FirecrawlSettings) -> Result<Self> {
        let client =
            build_client(api_key, settings).map_err(|e| LeadError::Extraction(Box::new(e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BaseExtractionService for FirecrawlExtraction {
    async fn extract(
        &self,
        url: &str,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request = ExtractRequest::new(vec![url.to_string()], prompt, schema.clone());

        self.client
            .extract(&request)
            .await
            .map_err(|e| LeadError::Extraction(Box::new(e)))
    }
}
