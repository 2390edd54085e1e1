//! Prometheus metrics endpoint
//!
//! Exposes relay counters and latency in Prometheus format.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "gomi_proxy_requests_total",
        "Total number of relay requests by outcome"
    );
    metrics::describe_histogram!(
        "gomi_proxy_request_duration_seconds",
        "Relay request duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a relayed request
pub fn record_request(outcome: &str, mode: &str, duration_secs: f64) {
    metrics::counter!(
        "gomi_proxy_requests_total",
        "outcome" => outcome.to_string(),
        "mode" => mode.to_string()
    )
    .increment(1);
    metrics::histogram!("gomi_proxy_request_duration_seconds", "mode" => mode.to_string())
        .record(duration_secs);
}
