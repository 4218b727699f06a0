//! Pure Firecrawl REST API client.
//!
//! A minimal client for the Firecrawl v1 API. Supports web search and
//! schema-driven extraction, including polling asynchronous extract jobs.
//!
//! # Example
//!
//! ```rust,ignore
//! use firecrawl_client::{ExtractRequest, FirecrawlClient, SearchRequest};
//!
//! let client = FirecrawlClient::new("fc-...")?;
//!
//! let results = client.search(&SearchRequest::new("rust web frameworks", 5)).await?;
//! for url in results.urls() {
//!     println!("{}", url);
//! }
//!
//! let body = client
//!     .extract(&ExtractRequest::new(vec![url], "Extract the title", schema))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{FirecrawlError, Result};
pub use types::{ExtractRequest, JobStatus, SearchRequest, SearchResponse};

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

const BASE_URL: &str = "https://api.firecrawl.dev/v1";

/// Pure Firecrawl API client.
#[derive(Clone)]
pub struct FirecrawlClient {
    client: Client,
    api_key: String,
    base_url: String,
    /// Overall budget for polling an extract job (seconds)
    poll_timeout_secs: u64,
    /// Interval between poll attempts (seconds)
    poll_interval_secs: u64,
}

impl FirecrawlClient {
    /// Create a new Firecrawl client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| FirecrawlError::Config(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            poll_timeout_secs: 180,
            poll_interval_secs: 2,
        })
    }

    /// Set a custom base URL (self-hosted Firecrawl, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the extract poll budget (seconds).
    pub fn with_poll_timeout(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Set the extract poll interval (seconds, at least 1).
    pub fn with_poll_interval(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs.max(1);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search the web.
    ///
    /// Returns the parsed response body for any 2xx status; the caller
    /// inspects `success` itself.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        debug!(query = %request.query, limit = request.limit, "Firecrawl search");
        let body = self.post("/search", request).await?;
        serde_json::from_value(body).map_err(|e| FirecrawlError::Parse(e.to_string()))
    }

    /// Run a schema-driven extraction and return the raw response body.
    ///
    /// If the service starts an asynchronous job, the job is polled until it
    /// completes, fails, or the poll budget runs out.
    pub async fn extract(&self, request: &ExtractRequest) -> Result<serde_json::Value> {
        let body = self.post("/extract", request).await?;

        match types::pending_job_id(&body) {
            Some(job_id) => {
                info!(job_id = %job_id, urls = ?request.urls, "Extract job started, polling");
                self.wait_for_extract(&job_id).await
            }
            None => Ok(body),
        }
    }

    /// Poll an extract job until it reaches a terminal state.
    pub async fn wait_for_extract(&self, job_id: &str) -> Result<serde_json::Value> {
        let max_attempts = (self.poll_timeout_secs / self.poll_interval_secs).max(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            if attempts > max_attempts {
                return Err(FirecrawlError::Timeout {
                    id: job_id.to_string(),
                    secs: self.poll_timeout_secs,
                });
            }

            tokio::time::sleep(Duration::from_secs(self.poll_interval_secs)).await;

            let body = self.get(&format!("/extract/{}", job_id)).await?;
            match JobStatus::of(&body) {
                JobStatus::Completed => return Ok(body),
                JobStatus::Failed(status) => {
                    return Err(FirecrawlError::JobFailed {
                        id: job_id.to_string(),
                        status,
                    });
                }
                JobStatus::Processing => {
                    debug!(job_id, attempts, "Extract job still in progress");
                }
            }
        }
    }

    async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, endpoint, "Firecrawl request failed");
                FirecrawlError::Network(e.to_string())
            })?;

        Self::read_body(response).await
    }

    async fn get(&self, endpoint: &str) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<serde_json::Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "Firecrawl API error");
            return Err(FirecrawlError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| FirecrawlError::Parse(e.to_string()))
    }
}
