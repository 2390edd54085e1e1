//! Failure path tests
//!
//! Method gate, missing key, malformed input and upstream transport failures.
//! None of these may leak the API key or internal detail to the caller.

use axum::http::{Method, StatusCode};
use gomi_proxy::{
    error::{GENERIC_FAILURE_MESSAGE, MISSING_API_KEY_MESSAGE},
    PayloadMode,
};
use serde_json::{json, Value};

use crate::common::{
    capture_logs,
    constants::{PROXY_PATH, TEST_API_KEY},
    test_config, test_server, RelayHarness,
};
use crate::mocks::GeminiTestData;

// Nothing listens on port 1, so connecting fails immediately
const UNREACHABLE_GEMINI: &str = "http://127.0.0.1:1";

#[tokio::test]
async fn test_non_post_methods_get_405_without_upstream_or_config() {
    // No key: if the key were checked first these would be 500s
    let harness = RelayHarness::with_key(PayloadMode::PassThrough, None).await;
    harness.gemini.expect_no_requests().await;

    for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
        let response = harness.server.method(method.clone(), PROXY_PATH).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.text(), "Method Not Allowed", "method {}", method);
    }

    assert!(harness.gemini.received().await.is_empty());
}

#[tokio::test]
async fn test_missing_key_returns_json_500_without_network() {
    let harness = RelayHarness::with_key(PayloadMode::PassThrough, None).await;
    harness.gemini.expect_no_requests().await;

    let response = harness
        .server
        .post(PROXY_PATH)
        .json(&GeminiTestData::content_request())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": MISSING_API_KEY_MESSAGE }));
}

#[tokio::test]
async fn test_missing_key_wins_over_malformed_body() {
    let harness = RelayHarness::with_key(PayloadMode::MessageEnvelope, None).await;
    harness.gemini.expect_no_requests().await;

    for body in ["{not json", "", "null"] {
        let response = harness.server.post(PROXY_PATH).text(body).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<Value>(),
            json!({ "error": MISSING_API_KEY_MESSAGE }),
            "body {:?}",
            body
        );
    }
}

#[tokio::test]
async fn test_empty_key_is_treated_as_missing() {
    let harness = RelayHarness::with_key(PayloadMode::PassThrough, Some("")).await;
    harness.gemini.expect_no_requests().await;

    let response = harness.server.post(PROXY_PATH).json(&json!({})).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"], json!(MISSING_API_KEY_MESSAGE));
}

#[tokio::test]
async fn test_malformed_json_is_generic_500() {
    let harness = RelayHarness::new(PayloadMode::PassThrough).await;
    harness.gemini.expect_no_requests().await;

    let response = harness.server.post(PROXY_PATH).text("{\"contents\": [").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": GENERIC_FAILURE_MESSAGE }));
}

#[tokio::test]
async fn test_empty_body_is_generic_500() {
    let harness = RelayHarness::new(PayloadMode::PassThrough).await;
    harness.gemini.expect_no_requests().await;

    let response = harness.server.post(PROXY_PATH).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": GENERIC_FAILURE_MESSAGE }));
}

#[tokio::test]
async fn test_network_failure_is_generic_500() {
    let server = test_server(test_config(
        UNREACHABLE_GEMINI,
        PayloadMode::PassThrough,
        Some(TEST_API_KEY),
    ));

    let response = server
        .post(PROXY_PATH)
        .json(&GeminiTestData::content_request())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": GENERIC_FAILURE_MESSAGE }));
}

#[tokio::test]
async fn test_non_json_upstream_reply_is_generic_500() {
    let harness = RelayHarness::new(PayloadMode::PassThrough).await;
    harness
        .gemini
        .mock_raw_reply("generateContent", 502, "<html>Bad Gateway</html>")
        .await;

    let response = harness
        .server
        .post(PROXY_PATH)
        .json(&GeminiTestData::content_request())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({ "error": GENERIC_FAILURE_MESSAGE }));
}

#[tokio::test]
async fn test_key_never_appears_in_responses_or_logs() {
    let (logs, _guard) = capture_logs();
    let mut bodies = Vec::new();

    let harness = RelayHarness::new(PayloadMode::MessageEnvelope).await;
    harness
        .gemini
        .mock_reply("generateMessage", 200, GeminiTestData::message_response())
        .await;
    let response = harness
        .server
        .post(PROXY_PATH)
        .json(&json!({ "userMessage": "hi", "systemPrompt": "be terse" }))
        .await;
    response.assert_status_ok();
    bodies.push(response.text());

    let harness = RelayHarness::new(PayloadMode::PassThrough).await;
    harness
        .gemini
        .mock_reply("generateContent", 403, json!({ "error": "forbidden" }))
        .await;
    let response = harness.server.post(PROXY_PATH).json(&json!({})).await;
    response.assert_status(StatusCode::FORBIDDEN);
    bodies.push(response.text());

    let server = test_server(test_config(
        UNREACHABLE_GEMINI,
        PayloadMode::PassThrough,
        Some(TEST_API_KEY),
    ));
    let response = server.post(PROXY_PATH).json(&json!({})).await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    bodies.push(response.text());

    for body in &bodies {
        assert!(!body.contains(TEST_API_KEY), "key leaked in body: {}", body);
    }

    let logged = logs.contents();
    assert!(logged.contains("Relay request started"), "logs were not captured");
    assert!(logged.contains("Gemini API error"));
    assert!(logged.contains("Relay request failed"));
    assert!(!logged.contains(TEST_API_KEY), "key leaked in logs");
}
