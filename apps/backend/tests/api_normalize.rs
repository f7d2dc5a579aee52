//! Normalization and health API tests.

mod common;

use axum::http::StatusCode;

use common::fixtures;
use common::TestContext;
use recitation_backend::config::Config;

/// Test health check responds OK.
#[tokio::test]
async fn test_health_check() {
    let server = TestContext::new().server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "OK");
}

/// Test normalization strips diacritics.
#[tokio::test]
async fn test_normalize_strips_diacritics() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/normalize")
        .json(&fixtures::normalize_request(fixtures::AL_HAMD))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["normalized"], "الحمد لله رب العالمين");
}

/// Test normalization of empty text.
#[tokio::test]
async fn test_normalize_empty() {
    let server = TestContext::new().server();

    let response = server
        .post("/api/normalize")
        .json(&fixtures::normalize_request(""))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["normalized"], "");
}

/// Test oversized text is rejected.
#[tokio::test]
async fn test_normalize_rejects_oversized_text() {
    let server = TestContext::with_config(Config {
        max_transcript_chars: 5,
        ..Config::default()
    })
    .server();

    let response = server
        .post("/api/normalize")
        .json(&fixtures::normalize_request(fixtures::AL_HAMD))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}
