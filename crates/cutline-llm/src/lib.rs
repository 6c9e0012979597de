//! Gemini structured-output client.
//!
//! Implements the engine's [`StructuredGenerator`] seam against the
//! Gemini REST API, with a model fallback ladder for resilience.
//!
//! [`StructuredGenerator`]: cutline_engine::StructuredGenerator

pub mod gemini;

pub use gemini::GeminiClient;
