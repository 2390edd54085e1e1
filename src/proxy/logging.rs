//! Request logging for the relay
//!
//! Structured logging with a short correlation ID per request. Nothing in
//! here receives the API key or the full upstream URL.

use std::time::Instant;
use tracing::{debug, error, info, Span};
use uuid::Uuid;

use crate::proxy::PayloadMode;

/// Context for tracking one relayed request
#[derive(Debug, Clone)]
pub struct RelayContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Payload mode in effect
    pub mode: PayloadMode,
    /// Upstream model
    pub model: String,
}

impl RelayContext {
    /// Create a new relay context
    pub fn new(mode: PayloadMode, model: impl Into<String>) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            mode,
            model: model.into(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Get elapsed time in seconds, for metrics
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn log_request_start(&self, method: &str) {
        info!(
            trace_id = %self.trace_id,
            mode = %self.mode,
            model = %self.model,
            method = %method,
            "Relay request started"
        );
    }

    /// Log the envelope fields received from the client (debug level)
    pub fn log_inbound_fields(
        &self,
        user_message: Option<&serde_json::Value>,
        system_prompt: Option<&serde_json::Value>,
    ) {
        debug!(
            trace_id = %self.trace_id,
            user_message = ?user_message,
            system_prompt = ?system_prompt,
            "Inbound message fields"
        );
    }

    /// Log the constructed upstream payload (debug level)
    pub fn log_payload_built(&self, payload: &serde_json::Value) {
        debug!(
            trace_id = %self.trace_id,
            payload = %payload,
            "Upstream payload built"
        );
    }

    /// Log request being sent upstream; `endpoint` must not carry the key
    pub fn log_upstream_request(&self, endpoint: &str) {
        debug!(
            trace_id = %self.trace_id,
            endpoint = %endpoint,
            elapsed_ms = %self.elapsed_ms(),
            "Sending request to Gemini"
        );
    }

    pub fn log_upstream_response(&self, status: u16) {
        info!(
            trace_id = %self.trace_id,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from Gemini"
        );
    }

    /// Log an error body returned by Gemini
    pub fn log_upstream_error(&self, status: u16, body: &serde_json::Value) {
        error!(
            trace_id = %self.trace_id,
            status = %status,
            body = %body,
            elapsed_ms = %self.elapsed_ms(),
            "Gemini API error"
        );
    }

    pub fn log_request_complete(&self) {
        info!(
            trace_id = %self.trace_id,
            mode = %self.mode,
            elapsed_ms = %self.elapsed_ms(),
            "Relay request completed"
        );
    }

    /// Log a local failure with full detail; the caller only gets a fixed message
    pub fn log_error(&self, error: &str) {
        error!(
            trace_id = %self.trace_id,
            mode = %self.mode,
            model = %self.model,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Relay request failed"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "relay",
            trace_id = %self.trace_id,
            mode = %self.mode,
            model = %self.model,
        )
    }
}
