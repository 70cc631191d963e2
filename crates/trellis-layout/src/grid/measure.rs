//! Measurement: size every track so each child's desired size fits.

use tracing::trace;

use super::cell::{Cell, MeasureGroup};
use super::span::SpanKey;
use super::star;
use super::track::{Track, TrackKinds};
use super::{total_extent, Grid};
use crate::measure_cache::MeasureCache;
use crate::{Axis, GridChild, Size};

impl Grid {
    /// Run the measure groups in order and return the grid's desired size.
    pub(super) fn measure_cells<C: GridChild>(
        &mut self,
        children: &mut [C],
        available: Size,
    ) -> Size {
        self.measure_group(children, MeasureGroup::Direct, false);
        self.measure_group(children, MeasureGroup::StarWithAuto, true);

        if self.cells.iter().any(Cell::has_star_rows) {
            star::distribute_measured(&mut self.row_tracks, available.height);
        }
        if self.cells.iter().any(Cell::has_star_columns) {
            star::distribute_measured(&mut self.column_tracks, available.width);
        }

        self.measure_group(children, MeasureGroup::StarWithAuto, false);
        self.measure_group(children, MeasureGroup::StarBound, false);
        debug_assert!(self.spans.is_empty(), "span ledger not drained");

        Size::new(
            total_extent(&self.column_tracks),
            total_extent(&self.row_tracks),
        )
    }

    /// Measure every cell of `group` and fold the results into the tracks.
    ///
    /// With `ignore_star` set, the star axis of a cell is proposed unbounded space and
    /// its result is discarded; only the other axis is recorded.
    fn measure_group<C: GridChild>(
        &mut self,
        children: &mut [C],
        group: MeasureGroup,
        ignore_star: bool,
    ) {
        for index in 0..self.cells.len() {
            let cell = self.cells[index];
            if cell.group != group {
                continue;
            }
            let placement = cell.placement;
            let ignore_rows = ignore_star && cell.has_star_rows();
            let ignore_columns = ignore_star && cell.has_star_columns();

            let proposal = Size::new(
                proposal_for(
                    &self.column_tracks,
                    cell.column_kinds,
                    placement.column,
                    placement.column_span,
                    ignore_columns,
                ),
                proposal_for(
                    &self.row_tracks,
                    cell.row_kinds,
                    placement.row,
                    placement.row_span,
                    ignore_rows,
                ),
            );

            let desired = measure_child(&mut self.cache, children, cell.child, proposal);
            trace!(
                "Group {} child {}: proposed {}x{}, desired {}x{}",
                group.index(),
                cell.child,
                proposal.width,
                proposal.height,
                desired.width,
                desired.height
            );

            if !ignore_rows {
                self.record(Axis::Row, placement.row, placement.row_span, desired.height);
            }
            if !ignore_columns {
                self.record(
                    Axis::Column,
                    placement.column,
                    placement.column_span,
                    desired.width,
                );
            }
        }

        self.spans.resolve(&mut self.row_tracks, &mut self.column_tracks);
    }

    /// Single-track cells grow their track directly; spans go to the ledger.
    fn record(&mut self, axis: Axis, start: usize, span: usize, desired: f32) {
        if span == 1 {
            let tracks = match axis {
                Axis::Row => &mut self.row_tracks,
                Axis::Column => &mut self.column_tracks,
            };
            tracks[start].accommodate(desired);
        } else {
            self.spans.record(SpanKey { axis, start, span }, desired);
        }
    }
}

/// Size proposed to a cell along one axis.
///
/// Auto spans without star tracks are unbounded so content decides; otherwise the
/// proposal is the current size of the spanned tracks.
fn proposal_for(
    tracks: &[Track],
    kinds: TrackKinds,
    start: usize,
    span: usize,
    ignore_star: bool,
) -> f32 {
    if ignore_star || (!kinds.contains(TrackKinds::STAR) && kinds.contains(TrackKinds::AUTO)) {
        return f32::INFINITY;
    }
    span_size(tracks, start, span)
}

/// Current size of `tracks[start..start + span]`, excluding the outer padding.
///
/// Internal margins and paddings count towards the span; the first track's leading
/// padding and the last track's trailing padding do not.
pub(crate) fn span_size(tracks: &[Track], start: usize, span: usize) -> f32 {
    if span == 1 {
        return tracks[start].proposal();
    }

    let end = start + span - 1;
    (start..=end)
        .map(|index| {
            let track = &tracks[index];
            if index == start {
                track.proposal() + track.padding.trailing + track.margin
            } else if index == end {
                track.proposal() + track.padding.leading
            } else {
                track.proposal() + track.padding.total() + track.margin
            }
        })
        .sum()
}

/// Ask a child for its desired size, reusing an earlier answer when it is still valid.
fn measure_child<C: GridChild>(
    cache: &mut MeasureCache,
    children: &mut [C],
    index: usize,
    proposal: Size,
) -> Size {
    if children[index].needs_measure() {
        cache.forget_child(index);
    } else if let Some(desired) = cache.lookup(index, proposal) {
        return desired;
    }
    let desired = children[index].measure(proposal);
    let desired = Size::new(desired.width.max(0.0), desired.height.max(0.0));
    cache.store(index, proposal, desired);
    desired
}
