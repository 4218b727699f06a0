use async_trait::async_trait;

use crate::error::{LeadError, Result};
use crate::traits::BaseSearchService;

/// Stands in for a search client that could not be built.
///
/// Every search fails with the construction error, which the searcher then
/// reports as "no results".
pub struct UnavailableSearch {
    reason: String,
}

impl UnavailableSearch {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl BaseSearchService for UnavailableSearch {
    async fn search(&self, _query: &str, _limit: u32) -> Result<Vec<String>> {
        Err(LeadError::search(format!(
            "search client unavailable: {}",
            self.reason
        )))
    }
}
