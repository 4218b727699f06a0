//! Candidate search against the external index.

use tracing::{info, warn};

use crate::prompts::search_query;
use crate::traits::BaseSearchService;

/// Finds candidate Q&A pages for a search phrase.
///
/// Never fails: any service error becomes an empty candidate list.
pub struct CandidateSearcher<S> {
    service: S,
}

impl<S: BaseSearchService> CandidateSearcher<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    /// Return at most `limit` URLs in service order.
    ///
    /// URLs are neither deduplicated nor validated.
    pub async fn search(&self, phrase: &str, limit: u32) -> Vec<String> {
        let query = search_query(phrase);

        match self.service.search(&query, limit).await {
            Ok(mut urls) => {
                urls.truncate(limit as usize);
                info!(query = %query, count = urls.len(), "Search returned candidates");
                urls
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed; treating as no results");
                Vec::new()
            }
        }
    }
}
