//! Firecrawl API request and response types.

use serde::{Deserialize, Serialize};

// =============================================================================
// Search
// =============================================================================

/// Body for `POST /search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    pub lang: String,
    pub location: String,
    /// Server-side timeout in milliseconds.
    pub timeout: u64,
}

impl SearchRequest {
    /// Create a search request with the default locale (`en`, United States)
    /// and a 60 second server-side timeout.
    pub fn new(query: impl Into<String>, limit: u32) -> Self {
        Self {
            query: query.into(),
            limit,
            lang: "en".to_string(),
            location: "United States".to_string(),
            timeout: 60_000,
        }
    }
}

/// Response from `POST /search`.
///
/// Every field is optional: callers decide what a missing `success` flag
/// means rather than failing deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl SearchResponse {
    /// True only when the service explicitly reported success.
    pub fn is_success(&self) -> bool {
        self.success == Some(true)
    }

    /// The `url` of every result item, in service order.
    ///
    /// Items without a string `url` are skipped.
    pub fn urls(&self) -> Vec<String> {
        self.data
            .iter()
            .filter_map(|item| item.get("url").and_then(|u| u.as_str()))
            .map(str::to_string)
            .collect()
    }
}

// =============================================================================
// Extract
// =============================================================================

/// Body for `POST /extract`.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    pub urls: Vec<String>,
    pub prompt: String,
    pub schema: serde_json::Value,
}

impl ExtractRequest {
    pub fn new(
        urls: Vec<String>,
        prompt: impl Into<String>,
        schema: serde_json::Value,
    ) -> Self {
        Self {
            urls,
            prompt: prompt.into(),
            schema,
        }
    }
}

/// State of an asynchronous extract job, read from a status body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Completed,
    Processing,
    Failed(String),
}

impl JobStatus {
    /// Classify the `status` field of an extract body.
    ///
    /// A body without `status` is treated as finished.
    pub fn of(body: &serde_json::Value) -> Self {
        match body.get("status").and_then(|s| s.as_str()) {
            None | Some("completed") => JobStatus::Completed,
            Some("processing") | Some("pending") | Some("scraping") => JobStatus::Processing,
            Some(other) => JobStatus::Failed(other.to_string()),
        }
    }
}

/// Id of an asynchronous extract job, when the start body carries one and no
/// inline payload.
pub(crate) fn pending_job_id(body: &serde_json::Value) -> Option<String> {
    let has_payload = body
        .get("data")
        .map(|d| !d.is_null())
        .unwrap_or(false);
    if has_payload {
        return None;
    }
    body.get("id").and_then(|id| id.as_str()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_request_defaults() {
        let request = SearchRequest::new("quora websites", 4);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "query": "quora websites",
                "limit": 4,
                "lang": "en",
                "location": "United States",
                "timeout": 60000
            })
        );
    }

    #[test]
    fn test_search_response_urls_keep_order_and_duplicates() {
        let response: SearchResponse = serde_json::from_value(json!({
            "success": true,
            "data": [
                {"url": "https://quora.com/b", "title": "B"},
                {"url": "https://quora.com/a"},
                {"title": "no url"},
                {"url": "https://quora.com/b"}
            ]
        }))
        .unwrap();

        assert!(response.is_success());
        assert_eq!(
            response.urls(),
            vec![
                "https://quora.com/b".to_string(),
                "https://quora.com/a".to_string(),
                "https://quora.com/b".to_string(),
            ]
        );
    }

    #[test]
    fn test_search_response_missing_success_is_not_success() {
        let response: SearchResponse =
            serde_json::from_value(json!({"data": [{"url": "https://quora.com/a"}]})).unwrap();
        assert!(!response.is_success());
    }

    #[test]
    fn test_job_status() {
        assert_eq!(JobStatus::of(&json!({"status": "completed"})), JobStatus::Completed);
        assert_eq!(JobStatus::of(&json!({"data": {}})), JobStatus::Completed);
        assert_eq!(JobStatus::of(&json!({"status": "processing"})), JobStatus::Processing);
        assert_eq!(
            JobStatus::of(&json!({"status": "cancelled"})),
            JobStatus::Failed("cancelled".to_string())
        );
    }

    #[test]
    fn test_pending_job_id() {
        assert_eq!(
            pending_job_id(&json!({"success": true, "id": "job-1"})),
            Some("job-1".to_string())
        );
        assert_eq!(
            pending_job_id(&json!({"success": true, "id": "job-1", "data": {"interactions": []}})),
            None
        );
        assert_eq!(pending_job_id(&json!({"success": true})), None);
    }
}
