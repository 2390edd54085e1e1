//! Error types for the proxy
//!
//! `ProxyError` is the boundary between what the operator log sees and what
//! the caller sees. Internal detail is carried in the variants for logging;
//! `IntoResponse` only ever emits a fixed message or the relayed upstream body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Plain-text body for the method gate
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

/// Caller-facing message when no API key is configured
pub const MISSING_API_KEY_MESSAGE: &str = "APIキーがサーバーに設定されていません。";

/// Caller-facing message for every other internal failure
pub const GENERIC_FAILURE_MESSAGE: &str = "リクエストの処理中にエラーが発生しました。";

/// Relay errors
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Gemini API key is not configured")]
    MissingApiKey,

    #[error("Upstream returned {status}: {body}")]
    Upstream { status: StatusCode, body: Value },

    #[error("JSON error: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for ProxyError {
    // reqwest embeds the request URL in its Display output, and the URL
    // carries the API key as a query parameter.
    fn from(err: reqwest::Error) -> Self {
        ProxyError::Http(err.without_url())
    }
}

impl ProxyError {
    /// Short label for metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyError::MethodNotAllowed(_) => "method_not_allowed",
            ProxyError::MissingApiKey => "missing_api_key",
            ProxyError::Upstream { .. } => "upstream_error",
            ProxyError::InvalidJson(_) | ProxyError::Http(_) | ProxyError::Internal(_) => {
                "internal_error"
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::MethodNotAllowed(_) => {
                (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY).into_response()
            }
            ProxyError::MissingApiKey => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: MISSING_API_KEY_MESSAGE,
                }),
            )
                .into_response(),
            ProxyError::Upstream { status, body } => (status, Json(body)).into_response(),
            ProxyError::InvalidJson(_) | ProxyError::Http(_) | ProxyError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: GENERIC_FAILURE_MESSAGE,
                }),
            )
                .into_response(),
        }
    }
}

/// Result type alias for convenience
pub type ProxyResult<T> = Result<T, ProxyError>;
