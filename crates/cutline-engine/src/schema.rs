//! Constrained-decoding schema for composition output.
//!
//! Built in the Gemini `responseSchema` dialect (upper-case type names,
//! `propertyOrdering`). The schema is static: it has no request-specific
//! parameters and therefore no failure modes of its own.
//!
//! Elements are deliberately a flat array of DSL strings rather than a
//! nested object tree; shallow schemas decode far more reliably.

use cutline_models::TransitionType;
use serde_json::{json, Value};

/// Schema for one optional transition.
fn transition_schema() -> Value {
    let names: Vec<&'static str> = TransitionType::ALL.iter().map(|t| t.as_str()).collect();
    json!({
        "type": "OBJECT",
        "nullable": true,
        "properties": {
            "type": {
                "type": "STRING",
                "enum": names,
            },
            "durationInSeconds": { "type": "NUMBER" },
        },
        "required": ["type", "durationInSeconds"],
    })
}

/// The full response schema: an array of tracks, each holding clips.
pub fn composition_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "clips": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "id": { "type": "STRING" },
                            "startTimeInSeconds": { "type": "NUMBER" },
                            "endTimeInSeconds": { "type": "NUMBER" },
                            "element": {
                                "type": "OBJECT",
                                "properties": {
                                    "elements": {
                                        "type": "ARRAY",
                                        "items": { "type": "STRING" },
                                    },
                                },
                                "required": ["elements"],
                            },
                            "transitionFromPrevious": transition_schema(),
                            "transitionToNext": transition_schema(),
                        },
                        "required": ["id", "startTimeInSeconds", "endTimeInSeconds", "element"],
                        "propertyOrdering": [
                            "id",
                            "startTimeInSeconds",
                            "endTimeInSeconds",
                            "element",
                            "transitionFromPrevious",
                            "transitionToNext",
                        ],
                    },
                },
            },
            "required": ["clips"],
        },
    })
}
