//! Upstream payload construction
//!
//! The relay speaks one of two Gemini API shapes, chosen at deployment time.
//! Each mode decides both the request body and the method segment of the
//! upstream URL, so the two can never disagree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sampling temperature sent with message envelopes
pub const ENVELOPE_TEMPERATURE: f64 = 0.2;

/// Output token cap sent with message envelopes
pub const ENVELOPE_MAX_OUTPUT_TOKENS: u32 = 1024;

/// How the inbound body is turned into an upstream request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Forward the caller's JSON unchanged to `generateContent`
    PassThrough,
    /// Wrap `userMessage`/`systemPrompt` into a prompt envelope for `generateMessage`
    MessageEnvelope,
}

impl PayloadMode {
    /// Method segment appended to the model path (`models/{model}:{method}`)
    pub fn upstream_method(&self) -> &'static str {
        match self {
            PayloadMode::PassThrough => "generateContent",
            PayloadMode::MessageEnvelope => "generateMessage",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadMode::PassThrough => "passthrough",
            PayloadMode::MessageEnvelope => "message-envelope",
        }
    }

    /// Build the upstream request body from the parsed inbound body
    pub fn build(&self, body: Value) -> Result<Value, serde_json::Error> {
        match self {
            PayloadMode::PassThrough => Ok(body),
            PayloadMode::MessageEnvelope => {
                let request = EnvelopeRequest::from_body(&body);
                serde_json::to_value(MessageEnvelope::new(request))
            }
        }
    }
}

impl fmt::Display for PayloadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayloadMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "passthrough" => Ok(PayloadMode::PassThrough),
            "message-envelope" => Ok(PayloadMode::MessageEnvelope),
            other => anyhow::bail!(
                "unknown payload mode '{}' (expected 'passthrough' or 'message-envelope')",
                other
            ),
        }
    }
}

/// Simplified client request for the envelope mode
///
/// Both fields are forwarded as found: no presence or type checks. An absent
/// field produces a message entry with no `content` key, which the upstream
/// API rejects on its own.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeRequest {
    #[serde(default, deserialize_with = "present")]
    pub user_message: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub system_prompt: Option<Value>,
}

// Keeps an explicit `null` as `Some(Value::Null)` so it is forwarded as `null`
// rather than dropped like a missing field.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl EnvelopeRequest {
    /// Pick the two fields out of any JSON value; non-objects yield neither
    pub fn from_body(body: &Value) -> Self {
        match body {
            Value::Object(map) => Self {
                user_message: map.get("userMessage").cloned(),
                system_prompt: map.get("systemPrompt").cloned(),
            },
            _ => Self::default(),
        }
    }
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    System,
    User,
}

/// A single role-tagged message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvelopeMessage {
    pub author: Author,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

/// Message list wrapper
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prompt {
    pub messages: Vec<EnvelopeMessage>,
}

/// Upstream body for `generateMessage`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    pub prompt: Prompt,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl MessageEnvelope {
    /// System message first, then the user message
    pub fn new(request: EnvelopeRequest) -> Self {
        Self {
            prompt: Prompt {
                messages: vec![
                    EnvelopeMessage {
                        author: Author::System,
                        content: request.system_prompt,
                    },
                    EnvelopeMessage {
                        author: Author::User,
                        content: request.user_message,
                    },
                ],
            },
            temperature: ENVELOPE_TEMPERATURE,
            max_output_tokens: ENVELOPE_MAX_OUTPUT_TOKENS,
        }
    }
}
