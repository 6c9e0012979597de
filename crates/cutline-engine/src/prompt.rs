//! Prompt construction for composition generation.
//!
//! Pure formatting: given the request inputs, produce the system
//! instruction and user prompt sent to the structured generator. No
//! network or storage access.

use cutline_models::{MediaAsset, Track};
use serde_json::Value;

/// Everything the prompt builder reads.
#[derive(Debug, Clone, Copy)]
pub struct PromptInputs<'a> {
    pub user_request: &'a str,
    pub preview_settings: &'a Value,
    pub media_library: Option<&'a [MediaAsset]>,
    pub current_composition: Option<&'a [Track]>,
}

/// Build `(system_instruction, user_prompt)` for a generation call.
pub fn build_prompts(inputs: &PromptInputs<'_>) -> (String, String) {
    (system_instruction(), user_prompt(inputs))
}

/// The static system instruction describing the composition format.
fn system_instruction() -> String {
    r#"You are an expert video editor. Your task is to produce a video composition timeline as a JSON array of tracks.

COMPOSITION RULES:
- The output is an array of tracks; track 0 renders first (bottom layer) and later tracks render on top of it.
- Each track holds clips with id, startTimeInSeconds and endTimeInSeconds.
- Clips on the same track must be chronological and must never overlap. Clips may touch exactly (one ends where the next starts).
- endTimeInSeconds must always be greater than startTimeInSeconds.

ELEMENT FORMAT:
- Each clip carries element.elements, a flat array of strings, one per render-tree node.
- Element strings use the form "Tag;key1:value1;key2:value2". Example: "Video;id:v1;parent:root;src:https://example.com/a.mp4;width:100%".
- Available tags: Video, Img, Audio, Txt, div.
- Hierarchy is expressed with the parent property referencing another element's id; use parent:root for top-level elements.
- Every element id must be unique across the whole composition.
- Property values may animate with the form @animate[t0,t1,...]:[v0,v1,...].

TRANSITIONS:
- transitionFromPrevious and transitionToNext are optional per clip.
- When two adjacent clips both declare a transition at the same boundary, the earlier clip's transitionToNext wins; omit the later clip's transitionFromPrevious in that case.
- Transition durations are in seconds and must be positive.

MEDIA USAGE:
- Only reference media URLs from the provided media library.
- When no media is available, build the composition from text, solid-color divs and shapes."#
        .to_string()
}

/// Assemble the request-specific user prompt.
fn user_prompt(inputs: &PromptInputs<'_>) -> String {
    let mut prompt = String::from("USER REQUEST:\n");
    prompt.push_str(inputs.user_request);

    prompt.push_str("\n\nPREVIEW SETTINGS:\n");
    prompt.push_str(&format_preview_settings(inputs.preview_settings));

    prompt.push_str("\n\nMEDIA LIBRARY:\n");
    prompt.push_str(&format_media_library(inputs.media_library));

    prompt.push_str("\n\nCURRENT COMPOSITION:\n");
    prompt.push_str(&format_current_composition(inputs.current_composition));

    prompt
}

fn format_preview_settings(settings: &Value) -> String {
    let width = settings.get("width").and_then(Value::as_u64);
    let height = settings.get("height").and_then(Value::as_u64);
    let fps = settings.get("fps").and_then(Value::as_u64);

    match (width, height) {
        (Some(w), Some(h)) => {
            let mut line = format!("Canvas: {}x{}", w, h);
            if let Some(fps) = fps {
                line.push_str(&format!(" at {} fps", fps));
            }
            line
        }
        _ => "Canvas: default (1920x1080)".to_string(),
    }
}

/// Bulleted `name: type (WxH)(Ns) - URL` lines, or an explanatory
/// placeholder when no assets are available.
fn format_media_library(library: Option<&[MediaAsset]>) -> String {
    let assets = match library {
        Some(assets) if !assets.is_empty() => assets,
        _ => {
            return "(no media assets available; build the composition from text, colors and shapes)"
                .to_string()
        }
    };

    let mut out = String::new();
    for asset in assets {
        out.push_str(&format!("- {}: {}", asset.name, asset.media_type.as_str()));
        if let (Some(w), Some(h)) = (asset.width, asset.height) {
            out.push_str(&format!(" ({}x{})", w, h));
        }
        if let Some(duration) = asset.duration_in_seconds {
            out.push_str(&format!(" ({:.1}s)", duration));
        }
        out.push_str(&format!(" - {}\n", asset.url));
    }
    out.pop();
    out
}

/// Structural summary plus the full JSON payload so the generator can make
/// an incremental edit instead of a from-scratch rewrite.
fn format_current_composition(composition: Option<&[Track]>) -> String {
    let tracks = match composition {
        Some(tracks) if !tracks.is_empty() => tracks,
        _ => return "(empty; create a new composition from scratch)".to_string(),
    };

    let clip_count: usize = tracks.iter().map(|t| t.clips.len()).sum();
    let payload = serde_json::to_string_pretty(tracks).unwrap_or_else(|_| "[]".to_string());

    format!(
        "{} track(s), {} clip(s). Edit this composition rather than rebuilding it; keep untouched clips exactly as they are:\n{}",
        tracks.len(),
        clip_count,
        payload
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_models::{Clip, ElementTree, MediaAsset, MediaType};
    use serde_json::json;

    fn inputs<'a>(
        settings: &'a Value,
        library: Option<&'a [MediaAsset]>,
        composition: Option<&'a [Track]>,
    ) -> PromptInputs<'a> {
        PromptInputs {
            user_request: "make a travel intro",
            preview_settings: settings,
            media_library: library,
            current_composition: composition,
        }
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let settings = json!({"width": 1280, "height": 720, "fps": 30});
        let a = build_prompts(&inputs(&settings, None, None));
        let b = build_prompts(&inputs(&settings, None, None));
        assert_eq!(a, b);
    }

    #[test]
    fn test_media_library_formatting() {
        let settings = Value::Null;
        let mut asset = MediaAsset::new("beach", MediaType::Video, "https://cdn.e.com/beach.mp4");
        asset.width = Some(1920);
        asset.height = Some(1080);
        asset.duration_in_seconds = Some(12.5);
        let library = [asset];

        let (_, prompt) = build_prompts(&inputs(&settings, Some(&library), None));
        assert!(prompt.contains("- beach: video (1920x1080) (12.5s) - https://cdn.e.com/beach.mp4"));
    }

    #[test]
    fn test_empty_media_library_gets_placeholder() {
        let settings = Value::Null;
        let (_, prompt) = build_prompts(&inputs(&settings, Some(&[]), None));
        assert!(prompt.contains("no media assets available"));
        assert!(!prompt.contains("- "));
    }

    #[test]
    fn test_current_composition_includes_summary_and_payload() {
        let settings = Value::Null;
        let tracks = [Track::new(vec![Clip::new(
            "c1",
            0.0,
            5.0,
            ElementTree::new(vec!["Txt;id:t1;parent:root;text:hi".to_string()]),
        )])];

        let (_, prompt) = build_prompts(&inputs(&settings, None, Some(&tracks)));
        assert!(prompt.contains("1 track(s), 1 clip(s)"));
        assert!(prompt.contains("\"startTimeInSeconds\": 0.0"));
    }

    #[test]
    fn test_missing_composition_says_from_scratch() {
        let settings = Value::Null;
        let (_, prompt) = build_prompts(&inputs(&settings, None, None));
        assert!(prompt.contains("from scratch"));
    }

    #[test]
    fn test_preview_settings_fallback() {
        let settings = Value::Null;
        let (_, prompt) = build_prompts(&inputs(&settings, None, None));
        assert!(prompt.contains("Canvas: default"));
    }

    #[test]
    fn test_system_instruction_mentions_transition_precedence() {
        let settings = Value::Null;
        let (system, _) = build_prompts(&inputs(&settings, None, None));
        assert!(system.contains("transitionToNext wins"));
    }
}
