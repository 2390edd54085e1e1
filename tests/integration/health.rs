//! Health endpoint integration tests
//!
//! - GET /health - status, version, uptime, configuration check
//! - GET /health/live - liveness probe

use axum::http::StatusCode;
use gomi_proxy::PayloadMode;
use serde_json::Value;

use crate::common::{constants::TEST_API_KEY, test_config, test_server};

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let server = test_server(test_config(
        "http://127.0.0.1:1",
        PayloadMode::PassThrough,
        Some(TEST_API_KEY),
    ));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json: Value = response.json();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["mode"], "passthrough");
    assert_eq!(json["model"], "gemini-1.5-flash-latest");
    assert_eq!(json["checks"]["api_key"]["status"], "healthy");
    assert!(json["uptime_seconds"].as_u64().is_some());

    let version = json["version"].as_str().unwrap();
    assert!(version.contains('.'), "Version should be in semver format");

    let timestamp = json["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());

    assert!(!response.text().contains(TEST_API_KEY));
}

#[tokio::test]
async fn test_health_is_degraded_without_key() {
    let server = test_server(test_config(
        "http://127.0.0.1:1",
        PayloadMode::MessageEnvelope,
        None,
    ));

    let response = server.get("/health").await;

    // Still 200: the key is checked per request, not at startup
    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["mode"], "message-envelope");
    assert_eq!(json["checks"]["api_key"]["status"], "degraded");
    assert!(json["checks"]["api_key"]["error"].is_string());
}

#[tokio::test]
async fn test_health_live_endpoint() {
    let server = test_server(test_config("http://127.0.0.1:1", PayloadMode::PassThrough, None));

    let response = server.get("/health/live").await;

    response.assert_status_ok();
    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_health_endpoints_accept_get_only() {
    let server = test_server(test_config("http://127.0.0.1:1", PayloadMode::PassThrough, None));

    server.post("/health").await.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    server.post("/health/live").await.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
