//! The outbound collaborator seam.
//!
//! The engine talks to whatever LLM backend is plugged in through the
//! [`StructuredGenerator`] trait. Implementations must surface failures
//! (timeouts, network errors, schema violations) as errors, never as
//! silently wrong data; the orchestrator converts them into a failure
//! result for the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type LlmResult<T> = Result<T, LlmError>;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("No content in response")]
    Empty,

    #[error("Failed to parse structured output: {0}")]
    Parse(String),

    #[error("All models failed: {0}")]
    Exhausted(String),
}

impl LlmError {
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// One chat turn sent to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Structured output plus the model that produced it.
#[derive(Debug, Clone)]
pub struct StructuredResponse {
    /// The decoded JSON value.
    pub value: serde_json::Value,

    /// Model name, for result metadata and audit records.
    pub model: String,
}

/// Schema-constrained generation capability.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Generate a JSON value conforming to `schema`.
    ///
    /// `model` overrides the implementation's default model selection when
    /// present.
    async fn generate_structured(
        &self,
        messages: &[ChatMessage],
        schema: &serde_json::Value,
        temperature: f64,
        model: Option<&str>,
    ) -> LlmResult<StructuredResponse>;
}
