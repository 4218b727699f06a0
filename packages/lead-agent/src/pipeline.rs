//! The lead pipeline: condense → search → extract → flatten.
//!
//! One [`LeadPipeline::run`] call is one run. Nothing survives between runs;
//! callers build a fresh pipeline (with the operator's credential) for each
//! request.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::condenser::QueryCondenser;
use crate::error::{LeadError, Result};
use crate::extractor::{FallbackReason, PageExtractor};
use crate::normalizer::flatten;
use crate::searcher::CandidateSearcher;
use crate::security::SecretString;
use crate::traits::{BaseAI, BaseExtractionService, BaseSearchService};
use crate::types::{
    Interaction, LeadReport, Narration, NarrationLevel, PageResult, PostKind, RunOutcome,
};

pub const MIN_LINKS: u32 = 1;
pub const MAX_LINKS: u32 = 15;
pub const DEFAULT_LINKS: u32 = 4;
pub const DEFAULT_MODEL: &str = "llama3.2";
/// Models offered to the operator, default first.
pub const MODEL_OPTIONS: [&str; 5] = ["llama3.2", "llama3.1", "llama2", "mistral", "codellama"];

pub const MISSING_INPUT_MESSAGE: &str =
    "Please fill in the Firecrawl API key and describe what leads you're looking for.";

// =============================================================================
// Request
// =============================================================================

/// What the operator submits for one run.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub firecrawl_api_key: Option<SecretString>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub num_links: Option<u32>,
    #[serde(default)]
    pub query: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct RunInput {
    pub firecrawl_api_key: SecretString,
    pub model: String,
    pub num_links: u32,
    pub query: String,
}

impl LeadRequest {
    /// Check required inputs and apply defaults.
    ///
    /// `default_model` is used when the request names no model.
    pub fn validate(self, default_model: &str) -> Result<RunInput> {
        let api_key = self.firecrawl_api_key.filter(|k| !k.is_blank());
        let query = self.query.filter(|q| !q.trim().is_empty());

        let (Some(firecrawl_api_key), Some(query)) = (api_key, query) else {
            return Err(LeadError::invalid(MISSING_INPUT_MESSAGE));
        };

        let num_links = self.num_links.unwrap_or(DEFAULT_LINKS);
        check_num_links(num_links)?;

        let model = self
            .model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default_model.to_string());

        Ok(RunInput {
            firecrawl_api_key,
            model,
            num_links,
            query,
        })
    }
}

fn check_num_links(num_links: u32) -> Result<()> {
    if !(MIN_LINKS..=MAX_LINKS).contains(&num_links) {
        return Err(LeadError::invalid(format!(
            "Number of links must be between {} and {}, got {}",
            MIN_LINKS, MAX_LINKS, num_links
        )));
    }
    Ok(())
}

// =============================================================================
// Narration
// =============================================================================

#[derive(Default)]
struct Narrator {
    lines: Vec<Narration>,
}

impl Narrator {
    fn push(&mut self, level: NarrationLevel, message: String) {
        match level {
            NarrationLevel::Info => info!(narration = %message),
            NarrationLevel::Warning => warn!(narration = %message),
            NarrationLevel::Error => error!(narration = %message),
        }
        self.lines.push(Narration { level, message });
    }

    fn info(&mut self, message: impl Into<String>) {
        self.push(NarrationLevel::Info, message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.push(NarrationLevel::Warning, message.into());
    }

    fn error(&mut self, message: impl Into<String>) {
        self.push(NarrationLevel::Error, message.into());
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Condenser, searcher and extractor wired for one run.
pub struct LeadPipeline<A, S, E> {
    condenser: QueryCondenser<A>,
    searcher: CandidateSearcher<S>,
    extractor: PageExtractor<E>,
}

impl<A, S, E> LeadPipeline<A, S, E>
where
    A: BaseAI,
    S: BaseSearchService,
    E: BaseExtractionService,
{
    pub fn new(ai: A, search: S, extractor: PageExtractor<E>) -> Self {
        Self {
            condenser: QueryCondenser::new(ai),
            searcher: CandidateSearcher::new(search),
            extractor,
        }
    }

    /// Run the whole pipeline for one query.
    ///
    /// Fails only on invalid input or a generation error; every other
    /// problem is reported through the narration and the outcome.
    pub async fn run(&self, query: &str, num_links: u32) -> Result<LeadReport> {
        if query.trim().is_empty() {
            return Err(LeadError::invalid(MISSING_INPUT_MESSAGE));
        }
        check_num_links(num_links)?;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        self.run_stages(query, num_links, run_id, started_at)
            .instrument(info_span!("lead_run", %run_id, num_links))
            .await
    }

    async fn run_stages(
        &self,
        query: &str,
        num_links: u32,
        run_id: Uuid,
        started_at: DateTime<Utc>,
    ) -> Result<LeadReport> {
        let mut narrator = Narrator::default();

        let search_phrase = self.condenser.condense(query).await?;
        narrator.info(format!("Searching for: {}", search_phrase));

        let urls = self.searcher.search(&search_phrase, num_links).await;
        if urls.is_empty() {
            narrator.warn("No relevant URLs found.");
            return Ok(LeadReport {
                run_id,
                started_at,
                search_phrase,
                urls,
                pages: 0,
                fallback_pages: 0,
                rows: Vec::new(),
                narration: narrator.lines,
                outcome: RunOutcome::NoUrls,
            });
        }
        narrator.info(format!("Found {} candidate URLs", urls.len()));

        let mut fallback_pages = 0;
        let mut results: Vec<PageResult> = Vec::with_capacity(urls.len());
        for url in &urls {
            narrator.info(format!("Processing URL: {}", url));
            let outcome = self.extractor.extract_page(url).await;
            match &outcome.fallback {
                None => narrator.info(describe_interactions(url, &outcome.result.interactions)),
                Some(FallbackReason::NoInteractions) => {
                    fallback_pages += 1;
                    narrator.warn(format!(
                        "No interactions found for {}; using fallback record",
                        url
                    ));
                }
                Some(reason) => {
                    fallback_pages += 1;
                    narrator.error(format!("Error processing URL {}: {}", url, reason));
                }
            }
            results.push(outcome.result);
        }

        let rows = flatten(&results);
        narrator.info(format!("Found {} URL responses", results.len()));
        narrator.info(format!("Flattened data has {} entries", rows.len()));

        let outcome = if rows.is_empty() {
            narrator.warn("No lead data could be extracted from the URLs.");
            RunOutcome::NoRows
        } else {
            narrator.info("Lead generation completed successfully!");
            RunOutcome::Completed
        };

        Ok(LeadReport {
            run_id,
            started_at,
            search_phrase,
            urls,
            pages: results.len(),
            fallback_pages,
            rows,
            narration: narrator.lines,
            outcome,
        })
    }
}

fn describe_interactions(url: &str, interactions: &[Interaction]) -> String {
    let count = |kind: PostKind| interactions.iter().filter(|i| i.post_kind() == kind).count();
    format!(
        "Extracted {} interactions from {} ({} questions, {} answers)",
        interactions.len(),
        url,
        count(PostKind::Question),
        count(PostKind::Answer)
    )
}
