//! Generation request/result wire types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{MediaAsset, Track};

/// Inbound request to generate (or incrementally edit) a composition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerationRequest {
    /// Natural-language description of what the user wants.
    #[serde(rename = "userRequest")]
    pub user_request: String,

    /// Renderer preview settings (width/height/fps and whatever else the
    /// client sends). Opaque passthrough; the prompt builder reads known
    /// keys when present.
    #[serde(rename = "previewSettings", default)]
    pub preview_settings: serde_json::Value,

    /// Assets the generator may reference.
    #[serde(rename = "mediaLibrary", skip_serializing_if = "Option::is_none")]
    pub media_library: Option<Vec<MediaAsset>>,

    /// Existing composition for incremental edits.
    #[serde(rename = "currentComposition", skip_serializing_if = "Option::is_none")]
    pub current_composition: Option<Vec<Track>>,

    /// Current preview frame snapshot. Opaque passthrough.
    #[serde(rename = "previewFrame", skip_serializing_if = "Option::is_none")]
    pub preview_frame: Option<serde_json::Value>,

    /// Explicit model override; bypasses the client's fallback ladder.
    #[serde(rename = "modelName", skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    /// Sampling temperature for the generator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Client session id; keys audit records.
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl GenerationRequest {
    /// Create a request with only the user's text.
    pub fn new(user_request: impl Into<String>) -> Self {
        Self {
            user_request: user_request.into(),
            preview_settings: serde_json::Value::Null,
            media_library: None,
            current_composition: None,
            preview_frame: None,
            model_name: None,
            temperature: None,
            session_id: None,
        }
    }
}

/// Counts describing the generated composition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResultMetadata {
    /// Number of tracks in the normalized composition.
    #[serde(rename = "tracksCount")]
    pub tracks_count: usize,
}

/// Outcome of one generation call.
///
/// Always structurally valid: on failure `composition_code` still holds a
/// renderable (empty) timeline so clients never special-case errors.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerationResult {
    /// Whether generation and normalization completed.
    pub success: bool,

    /// The normalized composition serialized as a 2-space-indented JSON
    /// string. A string rather than a nested value: downstream clients
    /// diff it as text.
    #[serde(rename = "compositionCode")]
    pub composition_code: String,

    /// Human-readable summary of what was produced (or why it failed).
    pub explanation: String,

    /// Total timeline duration in seconds.
    pub duration: f64,

    /// Model that produced (or was asked to produce) the composition.
    #[serde(rename = "modelUsed")]
    pub model_used: String,

    /// Error detail, present only on failure.
    #[serde(rename = "errorMessage", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Composition counts.
    pub metadata: ResultMetadata,
}
