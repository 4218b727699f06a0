//! End-to-end runs of the lead pipeline against mock services.
//!
//! Each test wires a condenser response, a search result list and per-URL
//! extraction responses, then checks the rows and narration of one run.

use std::sync::{Arc, Mutex};

use lead_agent::{
    fallback::FALLBACK_BIO,
    from_csv,
    testing::{MockAI, MockExtractionService, MockSearchService},
    to_csv, BaseSearchService, LeadError, LeadPipeline, NarrationLevel, PageExtractor, RunOutcome,
    UnavailableSearch,
};
use serde_json::json;
use tracing_subscriber::layer::SubscriberExt;

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|u| u.to_string()).collect()
}

fn messages(report: &lead_agent::LeadReport) -> Vec<&str> {
    report.narration.iter().map(|n| n.message.as_str()).collect()
}

#[tokio::test]
async fn test_no_urls_ends_run_without_rows() {
    let extraction = MockExtractionService::new();
    let pipeline = LeadPipeline::new(
        MockAI::new().with_response("AI video editing"),
        MockSearchService::new(),
        PageExtractor::new(extraction.clone()),
    );

    let report = pipeline.run("people editing videos with AI", 4).await.unwrap();

    assert_eq!(report.outcome, RunOutcome::NoUrls);
    assert!(!report.has_rows());
    assert!(extraction.calls().is_empty());
    assert!(!extraction.was_extracted("https://www.quora.com/a"));
    assert_eq!(
        messages(&report),
        vec!["Searching for: AI video editing", "No relevant URLs found."]
    );
}

#[tokio::test]
async fn test_failing_page_still_yields_a_row() {
    let pipeline = LeadPipeline::new(
        MockAI::new().with_response("AI video editing"),
        MockSearchService::new().with_urls(urls(&["https://www.quora.com/How-to-edit"])),
        PageExtractor::new(
            MockExtractionService::new().with_error("https://www.quora.com/How-to-edit", "HTTP 500"),
        ),
    );

    let report = pipeline.run("people editing videos with AI", 1).await.unwrap();

    assert_eq!(report.outcome, RunOutcome::Completed);
    assert_eq!(report.fallback_pages, 1);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].website_url, "https://www.quora.com/How-to-edit");
    assert_eq!(report.rows[0].username, "User from How-to-edit");
    assert_eq!(report.rows[0].bio, FALLBACK_BIO);
    assert_eq!(report.rows[0].upvotes, 0);
    assert!(report
        .narration
        .iter()
        .any(|n| n.level == NarrationLevel::Error && n.message.contains("HTTP 500")));
}

#[tokio::test]
async fn test_rows_follow_url_then_interaction_order() {
    let search = MockSearchService::new().with_urls(urls(&[
        "https://www.quora.com/a",
        "https://www.quora.com/b",
    ]));
    let extraction = MockExtractionService::new()
        .with_response(
            "https://www.quora.com/a",
            json!({"success": true, "data": {"interactions": [
                {"username": "asker", "post_type": "question", "upvotes": 4},
                {"username": "answerer", "post_type": "answer", "links": ["https://a.example"]}
            ]}}),
        )
        .with_response("https://www.quora.com/b", json!({"success": true, "data": {"interactions": []}}));
    let pipeline = LeadPipeline::new(
        MockAI::new().with_response("\"AI video editing\""),
        search.clone(),
        PageExtractor::new(extraction),
    );

    let report = pipeline.run("people editing videos with AI", 2).await.unwrap();

    assert_eq!(report.search_phrase, "AI video editing");
    assert_eq!(
        search.calls(),
        vec![(
            "quora websites where people are looking for AI video editing services".to_string(),
            2
        )]
    );
    assert_eq!(report.pages, 2);
    assert_eq!(report.fallback_pages, 1);

    let names: Vec<_> = report.rows.iter().map(|r| r.username.as_str()).collect();
    assert_eq!(names, vec!["asker", "answerer", "User from b"]);
    assert_eq!(report.rows[1].links, "https://a.example");

    let narration = messages(&report);
    assert!(narration.contains(&"Found 2 candidate URLs"));
    assert!(narration.contains(&"Found 2 URL responses"));
    assert!(narration.contains(&"Flattened data has 3 entries"));
    assert_eq!(narration.last(), Some(&"Lead generation completed successfully!"));
}

#[tokio::test]
async fn test_unavailable_extractor_falls_back_for_each_url() {
    let pipeline = LeadPipeline::new(
        MockAI::new(),
        MockSearchService::new().with_urls(urls(&["https://www.quora.com/topic/AI-video-editing"])),
        PageExtractor::<MockExtractionService>::unavailable("invalid credential"),
    );

    let report = pipeline.run("people editing videos with AI", 4).await.unwrap();

    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].username, "User from AI-video-editin");
    assert_eq!(report.rows[0].post_type, "question");
    assert_eq!(report.rows[0].timestamp, "2024-01-01");
}

#[tokio::test]
async fn test_search_over_limit_is_truncated() {
    let many: Vec<String> = (0..10).map(|i| format!("https://www.quora.com/q{}", i)).collect();
    let extraction = MockExtractionService::new();
    let pipeline = LeadPipeline::new(
        MockAI::new(),
        MockSearchService::new().with_urls(many),
        PageExtractor::new(extraction.clone()),
    );

    let report = pipeline.run("video editors", 3).await.unwrap();

    assert_eq!(report.urls.len(), 3);
    assert_eq!(extraction.calls().len(), 3);
    assert!(extraction.was_extracted("https://www.quora.com/q2"));
    assert!(!extraction.was_extracted("https://www.quora.com/q3"));
    assert_eq!(report.rows.len(), 3);
}

#[tokio::test]
async fn test_search_failure_reads_as_no_urls() {
    let pipeline = LeadPipeline::new(
        MockAI::new(),
        MockSearchService::new().failing("HTTP 401"),
        PageExtractor::new(MockExtractionService::new()),
    );

    let report = pipeline.run("video editors", 4).await.unwrap();

    assert_eq!(report.outcome, RunOutcome::NoUrls);
}

#[tokio::test]
async fn test_generation_failure_stops_the_run() {
    let search = MockSearchService::new().with_urls(urls(&["https://www.quora.com/a"]));
    let pipeline = LeadPipeline::new(
        MockAI::new().failing("connection refused"),
        search.clone(),
        PageExtractor::new(MockExtractionService::new()),
    );

    let err = pipeline.run("video editors", 4).await.unwrap_err();

    assert!(matches!(err, LeadError::Generation(_)));
    assert!(search.calls().is_empty());
}

#[tokio::test]
async fn test_invalid_input_is_rejected_before_any_call() {
    let ai = MockAI::new();
    let pipeline = LeadPipeline::new(
        ai.clone(),
        MockSearchService::new(),
        PageExtractor::new(MockExtractionService::new()),
    );

    assert!(matches!(
        pipeline.run("   ", 4).await,
        Err(LeadError::InvalidInput { .. })
    ));
    assert!(matches!(
        pipeline.run("video editors", 16).await,
        Err(LeadError::InvalidInput { .. })
    ));
    assert!(ai.calls().is_empty());
}

#[tokio::test]
async fn test_report_rows_survive_csv_export() {
    let pipeline = LeadPipeline::new(
        MockAI::new(),
        MockSearchService::new().with_urls(urls(&["https://www.quora.com/a"])),
        PageExtractor::new(MockExtractionService::new().with_response(
            "https://www.quora.com/a",
            json!({"data": [{"interactions": [
                {"username": "jane", "bio": "Editor, \"pro\"", "upvotes": "1,204",
                 "links": ["https://a.example", "https://b.example"]}
            ]}]}),
        )),
    );

    let report = pipeline.run("video editors", 1).await.unwrap();
    let csv = to_csv(&report.rows).unwrap();

    assert!(csv.starts_with("Website URL,Username,Bio,Post Type,Timestamp,Upvotes,Links\n"));
    let parsed = from_csv(&csv).unwrap();
    assert_eq!(parsed, report.rows);
    assert_eq!(parsed[0].upvotes, 1204);
    assert_eq!(parsed[0].links, "https://a.example, https://b.example");
}

#[tokio::test]
async fn test_unbuildable_search_client_reads_as_no_urls() {
    let search: Box<dyn BaseSearchService> = Box::new(UnavailableSearch::new("builder error"));
    let pipeline = LeadPipeline::new(
        MockAI::new().with_response("AI video editing"),
        search,
        PageExtractor::new(MockExtractionService::new()),
    );

    let report = pipeline.run("people editing videos with AI", 4).await.unwrap();

    assert_eq!(report.outcome, RunOutcome::NoUrls);
    assert_eq!(messages(&report).last(), Some(&"No relevant URLs found."));
}

/// Records the narration (or message) of every event, in emission order.
struct CaptureLines(Arc<Mutex<Vec<String>>>);

#[derive(Default)]
struct LineVisitor {
    narration: Option<String>,
    message: Option<String>,
}

impl tracing::field::Visit for LineVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "narration" => self.narration = Some(format!("{:?}", value)),
            "message" => self.message = Some(format!("{:?}", value)),
            _ => {}
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLines {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        if let Some(line) = visitor.narration.or(visitor.message) {
            self.0.lock().unwrap().push(line);
        }
    }
}

#[tokio::test]
async fn test_each_page_is_announced_before_it_is_extracted() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(CaptureLines(lines.clone()));
    let _guard = tracing::subscriber::set_default(subscriber);

    let pipeline = LeadPipeline::new(
        MockAI::new(),
        MockSearchService::new().with_urls(urls(&[
            "https://www.quora.com/broken",
            "https://www.quora.com/ok",
        ])),
        PageExtractor::new(
            MockExtractionService::new()
                .with_error("https://www.quora.com/broken", "HTTP 502")
                .with_response(
                    "https://www.quora.com/ok",
                    json!({"data": {"interactions": [{"username": "ok"}]}}),
                ),
        ),
    );

    pipeline.run("video editors", 2).await.unwrap();

    let lines = lines.lock().unwrap().clone();
    let position = |needle: &str| {
        lines
            .iter()
            .position(|l| l.starts_with(needle))
            .unwrap_or_else(|| panic!("missing log line {:?} in {:?}", needle, lines))
    };

    let announce_broken = position("Processing URL: https://www.quora.com/broken");
    let broken_failed = position("Extraction failed; using fallback");
    let announce_ok = position("Processing URL: https://www.quora.com/ok");
    let ok_extracted = position("Extracted interactions");

    assert!(announce_broken < broken_failed);
    assert!(broken_failed < announce_ok);
    assert!(announce_ok < ok_extracted);
}
