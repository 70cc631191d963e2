//! Child placement and per-pass cell classification.

use super::track::{span_kinds, Track, TrackKinds};

/// Attached placement of a child: starting row/column and how many tracks it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub row_span: usize,
    pub column_span: usize,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            row: 0,
            column: 0,
            row_span: 1,
            column_span: 1,
        }
    }
}

impl Placement {
    pub fn at(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            ..Self::default()
        }
    }

    pub fn with_row_span(mut self, span: usize) -> Self {
        self.row_span = span;
        self
    }

    pub fn with_column_span(mut self, span: usize) -> Self {
        self.column_span = span;
        self
    }

    /// Fit this placement into a grid of `rows` x `columns` tracks.
    ///
    /// Indices past the end move to the last track and spans shrink so the cell
    /// never extends past the grid. Zero spans become one.
    pub fn clamped(self, rows: usize, columns: usize) -> Self {
        let (row, row_span) = clamp_range(self.row, self.row_span, rows);
        let (column, column_span) = clamp_range(self.column, self.column_span, columns);
        Self {
            row,
            column,
            row_span,
            column_span,
        }
    }
}

fn clamp_range(start: usize, span: usize, count: usize) -> (usize, usize) {
    debug_assert!(count > 0, "an axis always has at least one track");
    let start = start.min(count - 1);
    let span = span.clamp(1, count - start);
    (start, span)
}

/// Measurement order of a cell, derived from the kinds of tracks it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) enum MeasureGroup {
    /// Touches no star track; measurable straight away.
    Direct = 0,
    /// Star on one axis meets auto on the other; measured twice.
    StarWithAuto = 1,
    /// Star meets fixed or star; measured once star sizes are known.
    StarBound = 2,
}

impl MeasureGroup {
    pub fn classify(rows: TrackKinds, columns: TrackKinds) -> Self {
        let star_rows = rows.contains(TrackKinds::STAR);
        let star_columns = columns.contains(TrackKinds::STAR);

        if !star_rows && !star_columns {
            MeasureGroup::Direct
        } else if (star_rows && columns.contains(TrackKinds::AUTO))
            || (rows.contains(TrackKinds::AUTO) && star_columns)
        {
            MeasureGroup::StarWithAuto
        } else {
            MeasureGroup::StarBound
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One placed child, rebuilt every preparation pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cell {
    pub child: usize,
    pub placement: Placement,
    pub row_kinds: TrackKinds,
    pub column_kinds: TrackKinds,
    pub group: MeasureGroup,
}

impl Cell {
    pub fn new(child: usize, placement: Placement, rows: &[Track], columns: &[Track]) -> Self {
        let placement = placement.clamped(rows.len(), columns.len());
        let row_kinds = span_kinds(rows, placement.row, placement.row_span);
        let column_kinds = span_kinds(columns, placement.column, placement.column_span);

        Self {
            child,
            placement,
            row_kinds,
            column_kinds,
            group: MeasureGroup::classify(row_kinds, column_kinds),
        }
    }

    pub fn has_star_rows(&self) -> bool {
        self.row_kinds.contains(TrackKinds::STAR)
    }

    pub fn has_star_columns(&self) -> bool {
        self.column_kinds.contains(TrackKinds::STAR)
    }
}
