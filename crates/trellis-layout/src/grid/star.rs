//! Star distribution: proportional sharing of leftover space.

use tracing::trace;

use super::track::Track;

/// Space granted per unit of star weight when `available` is shared among `tracks`.
///
/// Non-star tracks consume their full size with margin; star tracks consume only their
/// own margin and padding. Returns `None` when `available` is unbounded or no track
/// carries any weight.
pub(crate) fn space_per_star(tracks: &[Track], available: f32) -> Option<f32> {
    if !available.is_finite() {
        return None;
    }

    let (total_weight, consumed) = tracks.iter().fold((0.0f32, 0.0f32), |(weight, used), track| {
        let weight = if track.is_star() {
            weight + track.star_weight
        } else {
            weight
        };
        (weight, used + track.consumed())
    });

    if total_weight <= 0.0 {
        return None;
    }

    let remaining = (available - consumed).max(0.0);
    trace!(
        "Star distribution: available={}, consumed={}, remaining={}, weight={}",
        available,
        consumed,
        remaining,
        total_weight
    );
    Some(remaining / total_weight)
}

/// Hand out measure-time star sizes. Leaves tracks untouched on an unbounded axis.
pub(crate) fn distribute_measured(tracks: &mut [Track], available: f32) {
    let Some(unit) = space_per_star(tracks, available) else {
        return;
    };
    for track in tracks.iter_mut().filter(|t| t.is_star()) {
        track.measured_size = (unit * track.star_weight).max(0.0);
    }
}

/// Fix the final size of every star track for an arrange pass.
///
/// The share is kept inside the track's own bounds.
pub(crate) fn distribute_final(tracks: &mut [Track], final_size: f32) {
    let Some(unit) = space_per_star(tracks, final_size) else {
        return;
    };
    for track in tracks.iter_mut().filter(|t| t.is_star()) {
        let share = (unit * track.star_weight).max(0.0);
        track.current_min = clamp_to_bounds(share, track.min, track.max);
    }
}

/// Clamp without panicking when `min > max`; `max` wins.
pub(crate) fn clamp_to_bounds(value: f32, min: f32, max: f32) -> f32 {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}
