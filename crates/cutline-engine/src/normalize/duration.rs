//! Total-duration derivation.

use cutline_models::Track;
use tracing::warn;

/// Duration reported when a composition is empty or cannot be scanned.
pub const FALLBACK_DURATION: f64 = 5.0;

/// The maximum clip end time across every track, or [`FALLBACK_DURATION`]
/// for an empty composition or one containing non-finite end times.
///
/// Total: never panics.
pub fn total_duration(tracks: &[Track]) -> f64 {
    let mut max_end: Option<f64> = None;

    for track in tracks {
        for clip in &track.clips {
            let end = clip.end_time_in_seconds;
            if !end.is_finite() {
                warn!(clip = %clip.id, "non-finite clip end time, using fallback duration");
                return FALLBACK_DURATION;
            }
            max_end = Some(match max_end {
                Some(current) => current.max(end),
                None => end,
            });
        }
    }

    match max_end {
        Some(end) => end,
        None => {
            warn!("composition has no clips, using fallback duration");
            FALLBACK_DURATION
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cutline_models::{Clip, ElementTree};

    fn clip(id: &str, start: f64, end: f64) -> Clip {
        Clip::new(id, start, end, ElementTree::new(vec![]))
    }

    #[test]
    fn test_empty_composition_uses_fallback() {
        assert_eq!(total_duration(&[]), 5.0);
        assert_eq!(total_duration(&[Track::new(vec![])]), 5.0);
    }

    #[test]
    fn test_max_end_across_tracks() {
        let tracks = vec![
            Track::new(vec![clip("a", 0.0, 4.0), clip("b", 4.0, 12.5)]),
            Track::new(vec![clip("c", 2.0, 9.0)]),
        ];
        assert_eq!(total_duration(&tracks), 12.5);
    }

    #[test]
    fn test_non_finite_end_uses_fallback() {
        let tracks = vec![Track::new(vec![clip("a", 0.0, f64::NAN)])];
        assert_eq!(total_duration(&tracks), 5.0);

        let tracks = vec![Track::new(vec![clip("a", 0.0, f64::INFINITY)])];
        assert_eq!(total_duration(&tracks), 5.0);
    }
}
