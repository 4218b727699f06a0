//! Route tests driven through the router without a listener.
//!
//! The model server points at a closed local port, so every test runs
//! offline: generation fails fast and model listing falls back to the fixed
//! options.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use server_core::{server::build_app, Config};
use tower::ServiceExt;

fn test_app() -> Router {
    let config = Config {
        ollama_base_url: "http://127.0.0.1:9".to_string(),
        firecrawl_api_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    };
    build_app(config).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_ok() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_models_without_model_server_lists_fixed_options() {
    let response = test_app()
        .oneshot(Request::builder().uri("/api/models").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["default"], "llama3.2");
    assert_eq!(
        body["models"],
        json!(["llama3.2", "llama3.1", "llama2", "mistral", "codellama"])
    );
}

#[tokio::test]
async fn test_missing_key_is_bad_request() {
    let response = test_app()
        .oneshot(post_json("/api/leads", json!({"query": "video editors"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "Please fill in the Firecrawl API key and describe what leads you're looking for."
    );
}

#[tokio::test]
async fn test_blank_query_is_bad_request() {
    let response = test_app()
        .oneshot(post_json(
            "/api/leads",
            json!({"firecrawl_api_key": "fc-test", "query": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_num_links_out_of_range_is_bad_request() {
    for num_links in [0, 16] {
        let response = test_app()
            .oneshot(post_json(
                "/api/leads",
                json!({"firecrawl_api_key": "fc-test", "query": "video editors", "num_links": num_links}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_unreachable_model_server_is_bad_gateway() {
    let response = test_app()
        .oneshot(post_json(
            "/api/leads",
            json!({"firecrawl_api_key": "fc-test", "query": "video editors", "num_links": 2}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().starts_with("generation service error"));
}

#[tokio::test]
async fn test_csv_route_shares_validation() {
    let response = test_app()
        .oneshot(post_json("/api/leads/csv", json!({"firecrawl_api_key": "fc-test"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
