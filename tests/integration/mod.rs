//! Integration tests for the relay
//!
//! Each test drives the real router in-process against a wiremock stand-in
//! for the Gemini API.

mod failures;
mod health;
