//! Composition blueprint models: tracks, clips, element trees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Transition;

/// A full composition: tracks in render order.
///
/// Index 0 renders first (bottom layer) and is covered by later tracks.
pub type Composition = Vec<Track>;

/// A z-ordered layer holding non-overlapping clips.
///
/// Clip ordering is by construction only; generator output may arrive
/// unsorted and overlapping, which normalization repairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Track {
    /// Clips on this track.
    pub clips: Vec<Clip>,
}

impl Track {
    /// Create a track from clips.
    pub fn new(clips: Vec<Clip>) -> Self {
        Self { clips }
    }
}

/// The render tree carried by one clip.
///
/// A flat array of DSL strings (see [`crate::element`]); hierarchy is
/// expressed via `parent` properties, not nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ElementTree {
    /// DSL strings, one per render-tree node.
    pub elements: Vec<String>,
}

impl ElementTree {
    pub fn new(elements: Vec<String>) -> Self {
        Self { elements }
    }
}

/// A time-bounded segment of a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Clip {
    /// Unique clip id.
    pub id: String,

    /// Start time in seconds.
    #[serde(rename = "startTimeInSeconds")]
    pub start_time_in_seconds: f64,

    /// End time in seconds (always greater than start).
    #[serde(rename = "endTimeInSeconds")]
    pub end_time_in_seconds: f64,

    /// Render tree shown while this clip is active.
    pub element: ElementTree,

    /// Transition played entering this clip.
    #[serde(
        rename = "transitionFromPrevious",
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_from_previous: Option<Transition>,

    /// Transition played leaving this clip.
    #[serde(rename = "transitionToNext", skip_serializing_if = "Option::is_none")]
    pub transition_to_next: Option<Transition>,
}

impl Clip {
    /// Create a clip with no transitions.
    pub fn new(
        id: impl Into<String>,
        start_time_in_seconds: f64,
        end_time_in_seconds: f64,
        element: ElementTree,
    ) -> Self {
        Self {
            id: id.into(),
            start_time_in_seconds,
            end_time_in_seconds,
            element,
            transition_from_previous: None,
            transition_to_next: None,
        }
    }

    /// Clip duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time_in_seconds - self.start_time_in_seconds
    }

    /// Move both endpoints forward by `delta` seconds, preserving duration.
    pub fn shift_by(&mut self, delta: f64) {
        self.start_time_in_seconds += delta;
        self.end_time_in_seconds += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(id: &str, start: f64, end: f64) -> Clip {
        Clip::new(id, start, end, ElementTree::new(vec![]))
    }

    #[test]
    fn test_duration() {
        assert_eq!(clip("a", 1.5, 4.0).duration(), 2.5);
    }

    #[test]
    fn test_shift_preserves_duration() {
        let mut c = clip("a", 2.0, 5.0);
        c.shift_by(3.0);
        assert_eq!(c.start_time_in_seconds, 5.0);
        assert_eq!(c.end_time_in_seconds, 8.0);
        assert_eq!(c.duration(), 3.0);
    }

    #[test]
    fn test_clip_wire_names() {
        let c = clip("a", 0.0, 1.0);
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["startTimeInSeconds"], 0.0);
        assert_eq!(value["endTimeInSeconds"], 1.0);
        assert!(value.get("transitionToNext").is_none());
    }

    #[test]
    fn test_track_deserializes_generator_output() {
        let json = r#"{
            "clips": [{
                "id": "clip1",
                "startTimeInSeconds": 0,
                "endTimeInSeconds": 5,
                "element": {"elements": ["Video;id:v1;src:a.mp4"]},
                "transitionToNext": {"type": "fade", "durationInSeconds": 0.5}
            }]
        }"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.clips.len(), 1);
        assert_eq!(track.clips[0].element.elements[0], "Video;id:v1;src:a.mp4");
        assert!(track.clips[0].transition_to_next.is_some());
    }
}
