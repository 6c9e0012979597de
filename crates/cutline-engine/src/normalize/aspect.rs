//! Aspect-ratio repair for media elements.
//!
//! Generators frequently set only one of `width`/`height` on `Img` and
//! `Video` elements, which renderers interpret as a stretched dimension.
//! This pass gives the missing dimension an explicit `auto`. Idempotent:
//! after one pass both properties are always present, so a second pass
//! changes nothing.

use cutline_models::{ParsedElement, Track};
use tracing::debug;

/// Fix single-dimension media elements across all tracks. Returns the
/// number of elements changed (for logging only).
pub fn fix_aspect_ratios(tracks: &mut [Track]) -> usize {
    let mut fixes = 0;

    for track in tracks.iter_mut() {
        for clip in track.clips.iter_mut() {
            for dsl in clip.element.elements.iter_mut() {
                if fix_element(dsl) {
                    fixes += 1;
                }
            }
        }
    }

    if fixes > 0 {
        debug!(fixes, "added auto dimensions to media elements");
    }
    fixes
}

fn fix_element(dsl: &mut String) -> bool {
    // Strings without the separator are opaque; pass through untouched.
    let Some(mut element) = ParsedElement::parse(dsl) else {
        return false;
    };

    if element.tag != "Img" && element.tag != "Video" {
        return false;
    }

    let has_width = element.has("width");
    let has_height = element.has("height");
    if has_width == has_height {
        return false;
    }

    if has_width {
        element.push("height", "auto");
    } else {
        element.push("width", "auto");
    }

    *dsl = element.to_dsl_string();
    true
}
