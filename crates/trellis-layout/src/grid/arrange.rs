//! Arrangement: final track offsets and child rectangles.

use tracing::{debug, trace, warn};

use super::cell::Cell;
use super::star::{self, clamp_to_bounds};
use super::track::Track;
use super::{Grid, LayoutState};
use crate::definition::{GridUnit, TrackDefinition};
use crate::{GridChild, Rect, Size};

impl Grid {
    /// Place every child inside the grid's final size and return that size.
    ///
    /// Must follow a [`Grid::measure`] with the same children. Arranging an unmeasured
    /// grid is a caller bug: it panics in debug builds and does nothing otherwise.
    pub fn arrange<C: GridChild>(&mut self, children: &mut [C], final_size: Size) -> Size {
        if self.state == LayoutState::Unmeasured {
            warn!("Grid arrange skipped: grid has not been measured");
            debug_assert!(self.is_measure_valid(), "Grid::arrange called before Grid::measure");
            return final_size;
        }
        debug_assert_eq!(
            children.len(),
            self.cells.len(),
            "children changed between measure and arrange"
        );

        debug!(
            "Grid arrange: final {}x{}, {} cells",
            final_size.width,
            final_size.height,
            self.cells.len()
        );

        finalize_tracks(&mut self.row_tracks, &mut self.rows, final_size.height);
        finalize_tracks(&mut self.column_tracks, &mut self.columns, final_size.width);

        for cell in &self.cells {
            let Some(child) = children.get_mut(cell.child) else {
                continue;
            };
            let rect = cell_rect(cell, &self.row_tracks, &self.column_tracks);
            trace!(
                "Arrange child {}: ({}, {}) {}x{}",
                cell.child,
                rect.x,
                rect.y,
                rect.width,
                rect.height
            );
            child.arrange(rect);
        }

        self.state = LayoutState::Arranged;
        final_size
    }
}

/// Settle sizes against the final extent, then lay tracks end to end.
///
/// Star tracks take their share of `final_extent`; fixed tracks are held inside their
/// bounds. Resolved geometry is written back to the matching definition.
fn finalize_tracks(tracks: &mut [Track], definitions: &mut [TrackDefinition], final_extent: f32) {
    star::distribute_final(tracks, final_extent);

    let mut offset = 0.0;
    for (index, track) in tracks.iter_mut().enumerate() {
        if track.unit == GridUnit::Fixed {
            track.current_min = clamp_to_bounds(track.current_min, track.min, track.max);
        }
        if final_extent.is_finite() {
            debug_assert!(
                track.current_min.is_finite(),
                "track {index} left unbounded on a bounded axis"
            );
        }

        track.offset = offset;
        if let Some(definition) = definitions.get_mut(index) {
            definition.publish(track.full_size(), offset);
        }
        offset += track.full_size_with_margin();
    }
}

/// Rectangle covered by a cell, inside the outer padding of its first and last track.
fn cell_rect(cell: &Cell, rows: &[Track], columns: &[Track]) -> Rect {
    let p = cell.placement;
    let (x, width) = span_bounds(columns, p.column, p.column_span);
    let (y, height) = span_bounds(rows, p.row, p.row_span);
    Rect::new(x, y, width, height)
}

fn span_bounds(tracks: &[Track], start: usize, span: usize) -> (f32, f32) {
    let first = &tracks[start];
    let last = &tracks[start + span - 1];
    let origin = first.offset + first.padding.leading;
    let end = last.offset + last.full_size() - last.padding.trailing;
    (origin, end - origin)
}
