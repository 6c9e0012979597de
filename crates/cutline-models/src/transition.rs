//! Transition effect definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Named transition effects a renderer can apply between adjacent clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionType {
    Fade,
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    WipeLeft,
    WipeRight,
    WipeUp,
    WipeDown,
    FlipLeft,
    FlipRight,
    FlipUp,
    FlipDown,
    ClockWipe,
    Iris,
    ZoomIn,
    ZoomOut,
    Blur,
    Glitch,
    Dissolve,
}

impl TransitionType {
    /// Every transition type, in the order offered to the generator.
    pub const ALL: &'static [TransitionType] = &[
        TransitionType::Fade,
        TransitionType::SlideLeft,
        TransitionType::SlideRight,
        TransitionType::SlideUp,
        TransitionType::SlideDown,
        TransitionType::WipeLeft,
        TransitionType::WipeRight,
        TransitionType::WipeUp,
        TransitionType::WipeDown,
        TransitionType::FlipLeft,
        TransitionType::FlipRight,
        TransitionType::FlipUp,
        TransitionType::FlipDown,
        TransitionType::ClockWipe,
        TransitionType::Iris,
        TransitionType::ZoomIn,
        TransitionType::ZoomOut,
        TransitionType::Blur,
        TransitionType::Glitch,
        TransitionType::Dissolve,
    ];

    /// Wire name as it appears in composition JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::Fade => "fade",
            TransitionType::SlideLeft => "slide-left",
            TransitionType::SlideRight => "slide-right",
            TransitionType::SlideUp => "slide-up",
            TransitionType::SlideDown => "slide-down",
            TransitionType::WipeLeft => "wipe-left",
            TransitionType::WipeRight => "wipe-right",
            TransitionType::WipeUp => "wipe-up",
            TransitionType::WipeDown => "wipe-down",
            TransitionType::FlipLeft => "flip-left",
            TransitionType::FlipRight => "flip-right",
            TransitionType::FlipUp => "flip-up",
            TransitionType::FlipDown => "flip-down",
            TransitionType::ClockWipe => "clock-wipe",
            TransitionType::Iris => "iris",
            TransitionType::ZoomIn => "zoom-in",
            TransitionType::ZoomOut => "zoom-out",
            TransitionType::Blur => "blur",
            TransitionType::Glitch => "glitch",
            TransitionType::Dissolve => "dissolve",
        }
    }
}

impl fmt::Display for TransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransitionType {
    type Err = TransitionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| TransitionParseError(s.to_string()))
    }
}

#[derive(Debug, Error)]
#[error("Unknown transition type: {0}")]
pub struct TransitionParseError(String);

/// A transition between two adjacent clips on the same track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Transition {
    /// Which effect to apply.
    #[serde(rename = "type")]
    pub transition_type: TransitionType,

    /// Effect duration in seconds (always positive).
    #[serde(rename = "durationInSeconds")]
    pub duration_in_seconds: f64,
}

impl Transition {
    /// Create a new transition.
    pub fn new(transition_type: TransitionType, duration_in_seconds: f64) -> Self {
        Self {
            transition_type,
            duration_in_seconds,
        }
    }
}
