//! Completion Endpoint Contract Tests
//! Run with: cargo test --test completion_endpoint_test -- --ignored
//!
//! These need a completion backend listening on PARLOR_ENDPOINT
//! (default http://localhost:8000/chat), so they are ignored by default.

use std::sync::Once;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt::init();
    });
}

fn endpoint() -> String {
    std::env::var("PARLOR_ENDPOINT").unwrap_or_else(|_| "http://localhost:8000/chat".to_string())
}

/// The endpoint accepts `{"message": ...}` and replies `{"response": ...}`
#[tokio::test]
#[ignore]
async fn test_endpoint_returns_a_text_response() {
    ensure_init();

    let client = reqwest::Client::new();

    let request = serde_json::json!({ "message": "Reply with exactly: 'contract test passed'" });

    let response = client
        .post(endpoint())
        .json(&request)
        .send()
        .await
        .expect("Should make API call");

    assert!(
        response.status().is_success(),
        "API call should succeed: {:?}",
        response.text().await
    );

    let body: serde_json::Value = response.json().await.expect("Should parse JSON");

    let reply = body["response"].as_str().expect("Should have response text");
    assert!(!reply.is_empty(), "Response text should not be empty");
}

/// The response body carries nothing this client depends on besides `response`
#[tokio::test]
#[ignore]
async fn test_response_shape() {
    ensure_init();

    let client = reqwest::Client::new();

    let request = serde_json::json!({ "message": "What is 2+2?" });

    let response = client
        .post(endpoint())
        .json(&request)
        .send()
        .await
        .expect("Should make API call");

    let body: serde_json::Value = response.json().await.expect("Should parse JSON");

    assert!(body["response"].is_string(), "Response should have text: {}", body);
}

/// A malformed request body should not be accepted as a chat turn
#[tokio::test]
#[ignore]
async fn test_missing_message_field_rejected() {
    ensure_init();

    let client = reqwest::Client::new();

    let request = serde_json::json!({ "not_message": "hello" });

    let response = client
        .post(endpoint())
        .json(&request)
        .send()
        .await
        .expect("Should make API call");

    assert!(
        response.status().is_client_error(),
        "Malformed body should be rejected: {}",
        response.status()
    );
}
