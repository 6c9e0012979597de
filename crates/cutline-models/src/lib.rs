//! Shared data models for the Cutline composition backend.
//!
//! This crate provides Serde-serializable types for:
//! - Composition blueprints (tracks, clips, transitions)
//! - The flat element DSL used inside clips
//! - Media library assets
//! - Generation request/result wire schemas

pub mod composition;
pub mod element;
pub mod generation;
pub mod media;
pub mod transition;

// Re-export common types
pub use composition::{Clip, Composition, ElementTree, Track};
pub use element::ParsedElement;
pub use generation::{GenerationRequest, GenerationResult, ResultMetadata};
pub use media::{MediaAsset, MediaType};
pub use transition::{Transition, TransitionType};
