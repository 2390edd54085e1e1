//! Credential-injecting relay
//!
//! One call to [`CredentialProxy::handle`] per inbound request. The order of
//! checks is fixed: method, then API key, then body parsing, then the
//! upstream call.

use axum::http::Method;
use serde_json::Value;

use crate::{
    config::{ApiKey, Config},
    error::{ProxyError, ProxyResult},
    proxy::{payload::EnvelopeRequest, GeminiClient, PayloadMode, RelayContext},
};

/// Stateless relay holding the injected configuration
pub struct CredentialProxy {
    api_key: Option<ApiKey>,
    mode: PayloadMode,
    gemini: GeminiClient,
}

impl CredentialProxy {
    pub fn new(http_client: reqwest::Client, config: &Config) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            mode: config.payload_mode,
            gemini: GeminiClient::new(http_client, config),
        }
    }

    pub fn mode(&self) -> PayloadMode {
        self.mode
    }

    pub fn model(&self) -> &str {
        self.gemini.model()
    }

    /// Whether an API key is available to inject
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Relay one request
    ///
    /// Returns the upstream JSON on success. `ProxyError::Upstream` carries a
    /// non-2xx reply to be relayed verbatim; every other error is local.
    pub async fn handle(
        &self,
        ctx: &RelayContext,
        method: &Method,
        body: &[u8],
    ) -> ProxyResult<Value> {
        if method != Method::POST {
            return Err(ProxyError::MethodNotAllowed(method.to_string()));
        }

        let api_key = self.api_key.as_ref().ok_or(ProxyError::MissingApiKey)?;

        let body: Value = serde_json::from_slice(body)?;

        if self.mode == PayloadMode::MessageEnvelope {
            let fields = EnvelopeRequest::from_body(&body);
            ctx.log_inbound_fields(fields.user_message.as_ref(), fields.system_prompt.as_ref());
        }

        let payload = self.mode.build(body)?;
        ctx.log_payload_built(&payload);
        ctx.log_upstream_request(&self.gemini.endpoint(self.mode));

        match self.gemini.send(self.mode, api_key, &payload).await {
            Ok(data) => {
                ctx.log_upstream_response(200);
                Ok(data)
            }
            Err(ProxyError::Upstream { status, body }) => {
                ctx.log_upstream_error(status.as_u16(), &body);
                Err(ProxyError::Upstream { status, body })
            }
            Err(e) => Err(e),
        }
    }
}
