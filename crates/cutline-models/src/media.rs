//! Media library asset models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of media asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Video,
    Image,
    Audio,
    Voiceover,
    #[serde(other)]
    Other,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Video => "video",
            MediaType::Image => "image",
            MediaType::Audio => "audio",
            MediaType::Voiceover => "voiceover",
            MediaType::Other => "other",
        }
    }
}

/// One asset available to the generator for use in a composition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MediaAsset {
    /// Display name.
    pub name: String,

    /// Asset kind.
    #[serde(rename = "mediaType")]
    pub media_type: MediaType,

    /// Duration in seconds, for time-based media.
    #[serde(
        rename = "durationInSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_in_seconds: Option<f64>,

    /// Pixel width, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Public URL the renderer will load the asset from.
    pub url: String,
}

impl MediaAsset {
    /// Create an asset with only the required fields.
    pub fn new(name: impl Into<String>, media_type: MediaType, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            media_type,
            duration_in_seconds: None,
            width: None,
            height: None,
            url: url.into(),
        }
    }
}
