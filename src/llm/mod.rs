//! LLM-backed analysis path.
//!
//! Sends the symptom description to a chat-completions endpoint and maps the
//! model's JSON back into the same [`AnalysisResult`] shape the deterministic
//! engine produces, so downstream consumers never branch on which engine ran.
//!
//! [`AnalysisResult`]: crate::analyzer::AnalysisResult

pub mod client;
pub mod parser;
pub mod prompt;

pub use client::{ChatClient, MockChatClient, OpenAiClient};
pub use parser::parse_triage_response;

use thiserror::Error;

/// Errors from the LLM path. Any of these triggers fallback to the
/// deterministic analyzer.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("No API key configured")]
    NotConfigured,
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Model response contained no JSON object")]
    MalformedResponse,
    #[error("Cannot parse model JSON: {0}")]
    JsonParsing(String),
}
