//! Health check endpoints
//!
//! - `/health` - Full health check with configuration status
//! - `/health/live` - Liveness probe

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status enum
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Individual check result
#[derive(Debug, Serialize)]
pub struct ConfigCheck {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Checks collection
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub api_key: ConfigCheck,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub mode: String,
    pub model: String,
    pub checks: HealthChecks,
}

/// Simple health response for liveness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

fn check_api_key(state: &AppState) -> ConfigCheck {
    if state.proxy.is_configured() {
        ConfigCheck {
            status: HealthStatus::Healthy,
            error: None,
        }
    } else {
        ConfigCheck {
            status: HealthStatus::Degraded,
            error: Some("GEMINI_API_KEY is not set; relay requests will fail".to_string()),
        }
    }
}

/// Full health check endpoint
///
/// A missing API key reports `degraded` but still answers 200: the key is
/// checked per request, so the process itself is fine.
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let api_key = check_api_key(&state);
    let status = api_key.status.clone();

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        mode: state.proxy.mode().to_string(),
        model: state.proxy.model().to_string(),
        checks: HealthChecks { api_key },
    };

    (StatusCode::OK, Json(response))
}

/// Liveness probe endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
