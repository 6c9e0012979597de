//! Per-track overlap resolution.
//!
//! Clips on one track must be chronological and non-overlapping. This pass
//! stable-sorts each track by start time, then walks left to right: when a
//! clip starts before the previous one ends, that clip and every clip
//! after it shift forward by the overlap amount. Shifts only ever move
//! clips later, so a single pass reaches a fully overlap-free state; no
//! re-scan is needed. Durations, clip ids and relative order are all
//! preserved, and tracks never interact.

use std::cmp::Ordering;

use cutline_models::Track;
use tracing::debug;

/// Remove time overlaps from every track. Returns the number of shifts
/// applied (for logging; not part of the functional contract).
pub fn resolve_overlaps(tracks: &mut [Track]) -> usize {
    let mut total_shifts = 0;

    for (index, track) in tracks.iter_mut().enumerate() {
        let shifts = resolve_track(track);
        if shifts > 0 {
            debug!(track = index, shifts, "resolved clip overlaps");
        }
        total_shifts += shifts;
    }

    total_shifts
}

fn resolve_track(track: &mut Track) -> usize {
    let clips = &mut track.clips;
    if clips.len() < 2 {
        return 0;
    }

    // Stable: ties keep their generator order.
    clips.sort_by(|a, b| {
        a.start_time_in_seconds
            .partial_cmp(&b.start_time_in_seconds)
            .unwrap_or(Ordering::Equal)
    });

    let mut shifts = 0;
    for i in 0..clips.len() - 1 {
        let overlap = clips[i].end_time_in_seconds - clips[i + 1].start_time_in_seconds;
        // Exactly-touching clips (overlap == 0) are fine.
        if overlap > 0.0 {
            for clip in clips[i + 1..].iter_mut() {
                clip.shift_by(overlap);
            }
            shifts += 1;
        }
    }

    shifts
}
