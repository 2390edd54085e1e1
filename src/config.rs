//! Configuration management for the proxy
//!
//! Configuration is loaded from environment variables once at startup and
//! injected into the handler. The Gemini API key is optional here: a missing
//! key is reported per request, not at startup.

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::proxy::PayloadMode;

/// Server-held Gemini API credential
///
/// `Debug` is redacted so the key never ends up in log output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, treating an empty string as no key at all
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown log format '{}'", other),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Path the relay is mounted on
    pub proxy_path: String,
    /// Which upstream API shape to speak
    pub payload_mode: PayloadMode,

    /// Gemini API base URL (scheme and host, no trailing slash)
    pub gemini_api_url: String,
    /// API version path segment
    pub gemini_api_version: String,
    /// Model identifier
    pub gemini_model: String,
    /// Gemini API key, checked at request time
    pub gemini_api_key: Option<ApiKey>,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("PROXY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PROXY_PORT")
                .unwrap_or_else(|_| "8888".to_string())
                .parse()
                .context("Invalid PROXY_PORT")?,
            proxy_path: env::var("PROXY_PATH")
                .unwrap_or_else(|_| "/.netlify/functions/gomi-proxy".to_string()),
            payload_mode: env::var("PROXY_MODE")
                .unwrap_or_else(|_| "passthrough".to_string())
                .parse()
                .context("Invalid PROXY_MODE")?,

            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string())
                .trim_end_matches('/')
                .to_string(),
            gemini_api_version: env::var("GEMINI_API_VERSION")
                .unwrap_or_else(|_| "v1beta".to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().and_then(ApiKey::new),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string())
                .parse()
                .context("Invalid LOG_FORMAT")?,
        })
    }
}
