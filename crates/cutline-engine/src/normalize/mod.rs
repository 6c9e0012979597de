//! Deterministic repair passes for generated compositions.
//!
//! The generator is schema-constrained but not always correct: clips may
//! arrive unsorted or overlapping, and media elements may specify only one
//! dimension. Each pass here is pure in-memory mutation of data owned by
//! the current call, runs in a fixed order for reproducibility, and never
//! fails.

pub mod aspect;
pub mod duration;
pub mod overlap;

pub use aspect::fix_aspect_ratios;
pub use duration::{total_duration, FALLBACK_DURATION};
pub use overlap::resolve_overlaps;
