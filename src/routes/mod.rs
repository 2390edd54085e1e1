//! HTTP routes for the proxy
//!
//! The relay path is mounted with `any` so the relay itself answers
//! non-POST methods with its own 405.

pub mod health;
pub mod metrics;
pub mod relay;

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser clients call the relay cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let relay_routes = Router::new().route(&state.config.proxy_path, any(relay::relay));

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    Router::new()
        .merge(public_routes)
        .merge(relay_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
