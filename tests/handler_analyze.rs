mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use common::InMemoryCache;
use content_intake::api::handlers::analyze_handler;
use content_intake::infrastructure::cache::NullCache;
use serde_json::json;
use std::sync::Arc;

fn server() -> TestServer {
    let state = common::create_test_state(Arc::new(InMemoryCache::new()));
    let app = Router::new()
        .route("/api/analyze", post(analyze_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_analyze_success() {
    let server = server();

    let response = server
        .post("/api/analyze")
        .json(&json!({
            "messageId": "m-1",
            "senderId": "s-1",
            "content": "Hi! Track it at http://bit.ly/x or call +1 650 253 0000. Server 8.8.8.8"
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["messageId"], "m-1");
    assert_eq!(json["senderId"], "s-1");
    assert_eq!(json["language"], "eng");
    assert_eq!(json["confidence"], 92);
    assert_eq!(json["cached"], false);
    assert!(json["processingTimeMs"].is_u64());
    assert_eq!(json["urls"], json!(["https://example.com/landing"]));
    assert_eq!(json["shortenersUsed"], json!(["bit.ly"]));
    assert_eq!(json["phones"], json!(["+16502530000"]));
    assert_eq!(json["publicIps"], json!(["8.8.8.8"]));
    assert_eq!(json["riskScore"], 0);
    assert_eq!(json["riskIndicators"], json!([]));
}

#[tokio::test]
async fn test_analyze_repeated_content_is_cached() {
    let server = server();
    let body = json!({ "content": "Just a short hello" });

    let first = server.post("/api/analyze").json(&body).await;
    let second = server.post("/api/analyze").json(&body).await;

    assert_eq!(first.json::<serde_json::Value>()["cached"], false);
    let second = second.json::<serde_json::Value>();
    assert_eq!(second["cached"], true);
    assert_eq!(second["language"], "eng");
}

#[tokio::test]
async fn test_analyze_rejects_empty_content() {
    let server = server();

    let response = server
        .post("/api/analyze")
        .json(&json!({ "content": "" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"]["fields"]["content"].is_array());
}

#[tokio::test]
async fn test_analyze_rejects_oversized_content() {
    let server = server();

    let response = server
        .post("/api/analyze")
        .json(&json!({ "content": "a".repeat(2001) }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["details"]["max_length"], 2000);
}

#[tokio::test]
async fn test_analyze_accepts_content_at_limit() {
    let server = server();

    let response = server
        .post("/api/analyze")
        .json(&json!({ "content": "é".repeat(2000) }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_analyze_without_cache() {
    let state = common::create_test_state(Arc::new(NullCache::new()));
    let app = Router::new()
        .route("/api/analyze", post(analyze_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();
    let body = json!({ "content": "same words twice" });

    server.post("/api/analyze").json(&body).await.assert_status_ok();
    let second = server.post("/api/analyze").json(&body).await;

    second.assert_status_ok();
    assert_eq!(second.json::<serde_json::Value>()["cached"], false);
}
