//! Span ledger: the largest desired size requested for each multi-track span.
//!
//! Cells that cover several tracks cannot grow a single track directly. Their desired
//! sizes are collected per `(axis, start, span)` while a group is measured, keeping only
//! the largest request for each exact span, and are then spread over the spanned tracks.

use indexmap::IndexMap;
use tracing::trace;

use super::track::Track;
use crate::Axis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SpanKey {
    pub axis: Axis,
    pub start: usize,
    pub span: usize,
}

/// Pending span requests, resolved in the order they were first recorded.
#[derive(Debug, Default)]
pub(crate) struct SpanLedger {
    entries: IndexMap<SpanKey, f32>,
}

impl SpanLedger {
    pub fn record(&mut self, key: SpanKey, desired: f32) {
        let entry = self.entries.entry(key).or_insert(desired);
        if *entry < desired {
            *entry = desired;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Grow the spanned tracks to fit every recorded request, then forget them.
    pub fn resolve(&mut self, rows: &mut [Track], columns: &mut [Track]) {
        for (key, desired) in self.entries.drain(..) {
            let tracks = match key.axis {
                Axis::Row => &mut *rows,
                Axis::Column => &mut *columns,
            };
            distribute_span(&mut tracks[key.start..key.start + key.span], desired);
            trace!(
                "Resolved {} span {}+{} for {}",
                key.axis,
                key.start,
                key.span,
                desired
            );
        }
    }
}

/// Spread `desired` over `tracks`, growing only non-auto tracks and never past their max.
///
/// Each flexible track is offered an even share of what is still missing, counting the
/// tracks not yet visited. Auto tracks keep their own measured size but still use up
/// part of the request.
pub(crate) fn distribute_span(tracks: &mut [Track], desired: f32) {
    let cumulative: f32 = tracks.iter().map(|track| track.current_min).sum();
    if desired <= cumulative {
        return;
    }

    let count = tracks.len();
    let mut remaining = desired;
    for (i, track) in tracks.iter_mut().enumerate() {
        if !track.is_auto() {
            let share = (remaining / (count - i) as f32).min(track.max);
            if share > track.current_min {
                track.current_min = share;
            }
        }
        remaining -= track.current_min;
    }
}
