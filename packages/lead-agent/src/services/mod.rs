// Adapters from the pure REST clients to the infrastructure traits.

pub mod firecrawl;
pub mod ollama;
pub mod unavailable;

pub use firecrawl::{FirecrawlExtraction, FirecrawlSearch, FirecrawlSettings};
pub use ollama::OllamaAI;
pub use unavailable::UnavailableSearch;

use crate::extractor::PageExtractor;
use crate::security::SecretString;
use crate::traits::BaseSearchService;

/// Search service for one run.
///
/// A client that cannot be built becomes an [`UnavailableSearch`], so the run
/// ends with no candidates instead of an error.
pub fn firecrawl_search(
    api_key: &SecretString,
    settings: &FirecrawlSettings,
) -> Box<dyn BaseSearchService> {
    match FirecrawlSearch::new(api_key, settings) {
        Ok(search) => Box::new(search),
        Err(e) => {
            tracing::warn!(error = %e, "Search client unavailable; run will find no candidates");
            Box::new(UnavailableSearch::new(e.to_string()))
        }
    }
}

/// Page extractor for one run, built independently of the search client.
///
/// A client that cannot be built gives an extractor that falls back for
/// every page.
pub fn firecrawl_extractor(
    api_key: &SecretString,
    settings: &FirecrawlSettings,
) -> PageExtractor<FirecrawlExtraction> {
    match FirecrawlExtraction::new(api_key, settings) {
        Ok(extraction) => PageExtractor::new(extraction),
        Err(e) => {
            tracing::warn!(error = %e, "Extraction client unavailable; every page will fall back");
            PageExtractor::unavailable(e.to_string())
        }
    }
}
