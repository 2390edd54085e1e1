//! gomi-proxy - credential-injecting relay for the Gemini API
//!
//! Browser clients POST to the relay; the relay attaches the server-held
//! API key, forwards the request to Gemini and hands the reply back.

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::{ProxyError, ProxyResult};
pub use crate::proxy::{CredentialProxy, PayloadMode};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub start_time: Instant,
    /// Relay with the injected API key and payload mode
    pub proxy: Arc<CredentialProxy>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // No request timeout: upstream calls wait as long as Gemini takes
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .build()?;

        Ok(Self::with_client(config, http_client))
    }

    /// Create application state around an existing HTTP client
    pub fn with_client(config: Config, http_client: reqwest::Client) -> Self {
        let proxy = Arc::new(CredentialProxy::new(http_client.clone(), &config));

        Self {
            config,
            http_client,
            start_time: Instant::now(),
            proxy,
        }
    }
}
