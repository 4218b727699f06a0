//! Data model for a single lead run.
//!
//! Everything here is transient: built during one run and dropped with its
//! [`LeadReport`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

// =============================================================================
// Interaction
// =============================================================================

/// One post (question or answer) observed on a candidate page.
///
/// Records from the extraction service are loosely typed, so every field is
/// optional here. The normalizer decides the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Interaction {
    pub username: Option<String>,
    pub bio: Option<String>,
    /// Free-form; usually "question" or "answer".
    pub post_type: Option<String>,
    /// Free-form; no format is guaranteed.
    pub timestamp: Option<String>,
    pub upvotes: Option<u64>,
    pub links: Option<Vec<String>>,
}

impl Interaction {
    /// Read an interaction from an arbitrary JSON value.
    ///
    /// Never fails: fields with unusable shapes are left absent, and a
    /// non-object value yields an interaction with every field absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };

        Self {
            username: map.get("username").and_then(lenient_string),
            bio: map.get("bio").and_then(lenient_string),
            post_type: map.get("post_type").and_then(lenient_string),
            timestamp: map.get("timestamp").and_then(lenient_string),
            upvotes: map.get("upvotes").and_then(lenient_count),
            links: map.get("links").and_then(lenient_links),
        }
    }

    /// Classify `post_type` without changing it.
    pub fn post_kind(&self) -> PostKind {
        PostKind::classify(self.post_type.as_deref())
    }
}

fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().replace(',', "").parse::<u64>().ok(),
        _ => None,
    }
}

fn lenient_links(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(items.iter().filter_map(lenient_string).collect()),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

/// Read-only classification of a free-form `post_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Question,
    Answer,
    Other,
}

impl PostKind {
    pub fn classify(post_type: Option<&str>) -> Self {
        match post_type.map(|p| p.trim().to_ascii_lowercase()) {
            Some(p) if p == "question" => PostKind::Question,
            Some(p) if p == "answer" => PostKind::Answer,
            _ => PostKind::Other,
        }
    }
}

// =============================================================================
// Page result
// =============================================================================

/// Outcome of processing one candidate URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub source_url: String,
    /// Never empty: real records or one fallback record.
    pub interactions: Vec<Interaction>,
}

// =============================================================================
// Flattened row
// =============================================================================

/// Column headers of the tabular export, in order.
pub const COLUMNS: [&str; 7] = [
    "Website URL",
    "Username",
    "Bio",
    "Post Type",
    "Timestamp",
    "Upvotes",
    "Links",
];

/// One interaction joined with its source URL, ready for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedRow {
    #[serde(rename = "Website URL")]
    pub website_url: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Bio")]
    pub bio: String,
    #[serde(rename = "Post Type")]
    pub post_type: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Upvotes")]
    pub upvotes: u64,
    #[serde(rename = "Links")]
    pub links: String,
}

// =============================================================================
// Run report
// =============================================================================

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Search found no candidate pages
    NoUrls,
    /// Pages were processed but produced no rows
    NoRows,
    /// At least one row was produced
    Completed,
}

/// Severity of a narration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrationLevel {
    Info,
    Warning,
    Error,
}

/// One progress message for the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narration {
    pub level: NarrationLevel,
    pub message: String,
}

/// Everything one pipeline run produced.
#[derive(Debug, Clone, Serialize)]
pub struct LeadReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub search_phrase: String,
    pub urls: Vec<String>,
    /// Number of page results handed to the normalizer
    pub pages: usize,
    /// Pages that ended with a synthesized record
    pub fallback_pages: usize,
    pub rows: Vec<FlattenedRow>,
    pub narration: Vec<Narration>,
    pub outcome: RunOutcome,
}

impl LeadReport {
    /// True when there is a table worth exporting.
    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}
