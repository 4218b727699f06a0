//! Lead extraction pipeline for Q&A communities.
//!
//! Turns a free-text description of a target audience into a table of people
//! who asked or answered related questions:
//!
//! 1. [`condenser`] shortens the description to a 3-4 word phrase with an LLM
//! 2. [`searcher`] finds candidate question pages through a search service
//! 3. [`extractor`] pulls interaction records from each page, substituting a
//!    fallback record whenever a page yields nothing
//! 4. [`normalizer`] flattens everything into uniform rows
//! 5. [`export`] renders the rows as CSV
//!
//! # Usage
//!
//! ```rust,ignore
//! use lead_agent::{LeadPipeline, PageExtractor};
//! use lead_agent::testing::{MockAI, MockExtractionService, MockSearchService};
//!
//! let pipeline = LeadPipeline::new(
//!     MockAI::new(),
//!     MockSearchService::new(),
//!     PageExtractor::new(MockExtractionService::new()),
//! );
//! let report = pipeline.run("people editing videos with AI", 4).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Infrastructure trait abstractions (AI, search, extraction)
//! - [`services`] - Firecrawl and Ollama implementations of those traits
//! - [`pipeline`] - Run orchestration, input validation and narration
//! - [`testing`] - Mock implementations for testing

pub mod condenser;
pub mod error;
pub mod export;
pub mod extractor;
pub mod fallback;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
pub mod schema;
pub mod searcher;
pub mod security;
pub mod services;
pub mod testing;
pub mod traits;
pub mod types;
pub mod unwrap;

pub use condenser::QueryCondenser;
pub use error::{LeadError, Result};
pub use export::{from_csv, to_csv, CSV_CONTENT_TYPE, CSV_FILE_NAME};
pub use extractor::{FallbackReason, PageExtractor, PageOutcome};
pub use normalizer::flatten;
pub use pipeline::{
    LeadPipeline, LeadRequest, RunInput, DEFAULT_LINKS, DEFAULT_MODEL, MAX_LINKS, MIN_LINKS,
    MISSING_INPUT_MESSAGE, MODEL_OPTIONS,
};
pub use schema::RecordSchema;
pub use searcher::CandidateSearcher;
pub use security::SecretString;
pub use services::{
    firecrawl_extractor, firecrawl_search, FirecrawlExtraction, FirecrawlSearch, FirecrawlSettings,
    OllamaAI, UnavailableSearch,
};
pub use traits::{BaseAI, BaseExtractionService, BaseSearchService};
pub use types::{
    FlattenedRow, Interaction, LeadReport, Narration, NarrationLevel, PageResult, PostKind,
    RunOutcome, COLUMNS,
};
