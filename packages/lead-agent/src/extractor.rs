//! Per-page interaction extraction with per-URL failure isolation.
//!
//! Each URL is processed on its own: whatever goes wrong for one page ends in
//! a fallback record for that page and never touches the next one.

use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::LeadError;
use crate::fallback::fallback_interaction;
use crate::prompts::EXTRACT_PROMPT;
use crate::schema::RecordSchema;
use crate::traits::BaseExtractionService;
use crate::types::{Interaction, PageResult};
use crate::unwrap::{default_strategies, interactions_of, unwrap_payload, UnwrapStrategy};

/// Why a page ended up with a synthesized record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The extraction call failed
    Error(String),
    /// The response carried no usable interactions
    NoInteractions,
    /// No extraction service could be built for this run
    Unavailable(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Error(e) => write!(f, "{}", e),
            FallbackReason::NoInteractions => f.write_str("no interactions found"),
            FallbackReason::Unavailable(e) => write!(f, "extraction unavailable: {}", e),
        }
    }
}

/// Result of one URL plus how it was obtained.
#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub result: PageResult,
    /// `None` when the interactions came from the service
    pub fallback: Option<FallbackReason>,
}

enum Backend<E> {
    Service(E),
    Unavailable(String),
}

/// Calls the extraction service page by page.
pub struct PageExtractor<E> {
    backend: Backend<E>,
    schema: Value,
    strategies: Vec<Box<dyn UnwrapStrategy>>,
}

impl<E: BaseExtractionService> PageExtractor<E> {
    pub fn new(service: E) -> Self {
        Self::with_backend(Backend::Service(service))
    }

    /// An extractor with no service: every page gets a fallback record.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_backend(Backend::Unavailable(reason.into()))
    }

    fn with_backend(backend: Backend<E>) -> Self {
        Self {
            backend,
            schema: RecordSchema::interactions().to_json_schema(),
            strategies: default_strategies(),
        }
    }

    /// Process `urls` strictly in order, one at a time.
    ///
    /// Returns exactly one outcome per URL, in input order.
    pub async fn extract_all(&self, urls: &[String]) -> Vec<PageOutcome> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for url in urls {
            outcomes.push(self.extract_page(url).await);
        }
        outcomes
    }

    /// Process a single URL. Never fails.
    pub async fn extract_page(&self, url: &str) -> PageOutcome {
        let service = match &self.backend {
            Backend::Service(service) => service,
            Backend::Unavailable(reason) => {
                return fallback_outcome(url, FallbackReason::Unavailable(reason.clone()));
            }
        };

        match self.try_extract(service, url).await {
            Ok(Some(interactions)) => {
                info!(url, count = interactions.len(), "Extracted interactions");
                PageOutcome {
                    result: PageResult {
                        source_url: url.to_string(),
                        interactions,
                    },
                    fallback: None,
                }
            }
            Ok(None) => {
                warn!(url, "No interactions in extraction response; using fallback");
                fallback_outcome(url, FallbackReason::NoInteractions)
            }
            Err(e) => {
                warn!(url, error = %e, "Extraction failed; using fallback");
                fallback_outcome(url, FallbackReason::Error(e.to_string()))
            }
        }
    }

    async fn try_extract(
        &self,
        service: &E,
        url: &str,
    ) -> Result<Option<Vec<Interaction>>, LeadError> {
        let response = service.extract(url, EXTRACT_PROMPT, &self.schema).await?;

        let Some((strategy, payload)) = unwrap_payload(&self.strategies, &response) else {
            debug!(url, "No unwrap strategy produced a mapping");
            return Ok(None);
        };
        debug!(url, strategy, "Recovered extraction payload");

        Ok(interactions_of(&payload)
            .map(|items| items.iter().map(Interaction::from_value).collect()))
    }
}

fn fallback_outcome(url: &str, reason: FallbackReason) -> PageOutcome {
    PageOutcome {
        result: PageResult {
            source_url: url.to_string(),
            interactions: vec![fallback_interaction(url)],
        },
        fallback: Some(reason),
    }
}
