//! Preparation: rebuild the track and cell arenas for one measure pass.

use tracing::trace;

use super::cell::Cell;
use super::track::Track;
use super::Grid;
use crate::definition::{GridSpacing, TrackDefinition};
use crate::{Axis, GridChild, Size};

impl Grid {
    /// Resolve definitions into tracks and placements into cells.
    ///
    /// Star tracks of an axis whose available extent is unbounded are classified as auto
    /// for this pass; their declared mode still applies at arrangement.
    pub(super) fn prepare<C: GridChild>(&mut self, children: &[C], available: Size) {
        let rows_as_auto = available.height == f32::INFINITY;
        let columns_as_auto = available.width == f32::INFINITY;

        build_tracks(
            &mut self.row_tracks,
            &self.rows,
            Axis::Row,
            &self.spacing,
            rows_as_auto,
        );
        build_tracks(
            &mut self.column_tracks,
            &self.columns,
            Axis::Column,
            &self.spacing,
            columns_as_auto,
        );

        self.cells.clear();
        self.cells.extend(children.iter().enumerate().map(|(index, child)| {
            Cell::new(index, child.placement(), &self.row_tracks, &self.column_tracks)
        }));
        self.spans.clear();

        trace!(
            "Prepared {} rows, {} columns, {} cells (star as auto: rows {}, columns {})",
            self.row_tracks.len(),
            self.column_tracks.len(),
            self.cells.len(),
            rows_as_auto,
            columns_as_auto
        );
    }
}

/// Refill `tracks` from `definitions`, synthesizing one star track when there are none.
///
/// The last track never carries a margin.
fn build_tracks(
    tracks: &mut Vec<Track>,
    definitions: &[TrackDefinition],
    axis: Axis,
    spacing: &GridSpacing,
    star_as_auto: bool,
) {
    tracks.clear();
    if definitions.is_empty() {
        tracks.push(Track::implicit(star_as_auto));
        return;
    }

    let last = definitions.len() - 1;
    tracks.extend(definitions.iter().enumerate().map(|(index, definition)| {
        let margin = if index == last {
            0.0
        } else {
            spacing.margin_for(axis, definition)
        };
        Track::from_definition(definition, margin, star_as_auto)
    }));
}
