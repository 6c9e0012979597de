//! Composition generation and normalization pipeline.
//!
//! The engine turns a natural-language request into a composition
//! blueprint: it builds a prompt and a constrained-decoding schema, calls
//! a pluggable structured generator, then deterministically repairs the
//! output (overlap resolution, aspect-ratio fixing) before handing a
//! serialized composition back to the caller. Generation never fails the
//! caller; every error path yields a structurally valid result.

pub mod audit;
pub mod collaborator;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod schema;
pub mod service;

pub use audit::{AuditLog, AuditRecord};
pub use collaborator::{ChatMessage, LlmError, LlmResult, StructuredGenerator, StructuredResponse};
pub use error::{EngineError, EngineResult};
pub use service::CompositionService;
