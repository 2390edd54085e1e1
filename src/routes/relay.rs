//! Relay endpoint
//!
//! Adapts an HTTP request to [`CredentialProxy::handle`] and turns the result
//! into the outbound response. The relay runs on its own task so a client
//! disconnect does not abort an upstream call already in flight.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{debug, Instrument};

use crate::{
    error::ProxyError,
    proxy::RelayContext,
    routes::metrics::record_request,
    AppState,
};

/// Relay handler, mounted for every method on the configured path
pub async fn relay(State(state): State<Arc<AppState>>, method: Method, body: Bytes) -> Response {
    let proxy = state.proxy.clone();
    let ctx = RelayContext::new(proxy.mode(), proxy.model());
    ctx.log_request_start(method.as_str());

    let task = {
        let proxy = proxy.clone();
        let ctx = ctx.clone();
        let span = ctx.create_span();
        tokio::spawn(async move { proxy.handle(&ctx, &method, &body).await }.instrument(span))
    };

    let result = match task.await {
        Ok(result) => result,
        Err(e) => Err(ProxyError::Internal(anyhow::anyhow!("relay task failed: {}", e))),
    };

    match result {
        Ok(data) => {
            record_request("success", proxy.mode().as_str(), ctx.elapsed_secs());
            ctx.log_request_complete();
            (StatusCode::OK, Json(data)).into_response()
        }
        Err(err) => {
            match &err {
                // Already logged with its body
                ProxyError::Upstream { .. } => {}
                ProxyError::MethodNotAllowed(method) => {
                    debug!(trace_id = %ctx.trace_id, method = %method, "Rejected non-POST request");
                }
                other => ctx.log_error(&other.to_string()),
            }
            record_request(err.outcome(), proxy.mode().as_str(), ctx.elapsed_secs());
            err.into_response()
        }
    }
}
