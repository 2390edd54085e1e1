//! Proxy module
//!
//! Credential injection and request forwarding to the Gemini API.

pub mod gemini;
pub mod logging;
pub mod payload;
pub mod relay;

pub use gemini::GeminiClient;
pub use logging::RelayContext;
pub use payload::{MessageEnvelope, PayloadMode};
pub use relay::CredentialProxy;
