//! Gemini API client
//!
//! Issues the single upstream POST and classifies the reply. The API key is
//! attached as the `key` query parameter; it is never part of anything this
//! module logs.

use axum::http::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use crate::{
    config::{ApiKey, Config},
    error::{ProxyError, ProxyResult},
    proxy::PayloadMode,
};

/// Gemini generative-language API client
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_version: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.gemini_api_url.clone(),
            api_version: config.gemini_api_version.clone(),
            model: config.gemini_model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Endpoint URL without the key, safe to log
    pub fn endpoint(&self, mode: PayloadMode) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.base_url,
            self.api_version,
            self.model,
            mode.upstream_method()
        )
    }

    /// POST a payload to the endpoint for `mode`
    ///
    /// A 2xx reply yields its JSON body. Any other status becomes
    /// `ProxyError::Upstream` carrying that status and the JSON error body.
    /// Transport failures and non-JSON bodies surface as `Http` errors.
    pub async fn send(
        &self,
        mode: PayloadMode,
        api_key: &ApiKey,
        payload: &Value,
    ) -> ProxyResult<Value> {
        let response = self
            .client
            .post(self.endpoint(mode))
            .query(&[("key", api_key.expose())])
            .headers(self.default_headers())
            .json(payload)
            .send()
            .await?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if !status.is_success() {
            let body: Value = response.json().await?;
            return Err(ProxyError::Upstream { status, body });
        }

        let result = response.json().await?;
        Ok(result)
    }

    /// Build default headers for Gemini requests
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}
