//! # Grid Layout
//!
//! Two-dimensional layout of children into rows and columns.
//!
//! ## Overview
//!
//! Every track (row or column) is sized in one of three modes:
//! - **Fixed**: an exact pixel size, bounded by the track's min/max
//! - **Auto**: as large as the largest child placed only in it
//! - **Star**: a weighted share of whatever space fixed and auto tracks leave over
//!
//! Children may span several tracks in either direction.
//!
//! ## Passes
//!
//! A measure pass rebuilds the track and cell arenas from the current definitions
//! (`prepare`), then measures cells in three groups (`measure`) so that auto tracks
//! never depend on star sizes that are not known yet:
//!
//! 1. Cells touching no star track.
//! 2. Cells mixing star and auto tracks, measured once with star space treated as
//!    unbounded to settle the auto tracks.
//! 3. Star space is distributed, then the mixed cells are measured again together
//!    with every cell combining star with fixed or star tracks.
//!
//! Spans are resolved after each group (`span`). Arrangement (`arrange`) re-runs
//! star distribution against the final size, computes offsets and places every child.

mod arrange;
mod cell;
mod measure;
mod prepare;
mod span;
mod star;
mod track;

pub use cell::Placement;

use std::fmt;

use tracing::debug;

use self::cell::Cell;
use self::span::SpanLedger;
use self::track::Track;
use crate::definition::{GridSpacing, TrackDefinition};
use crate::measure_cache::{MeasureCache, MeasureCacheStats};
use crate::{Axis, LayoutError, Size};

/// Where a resolved track sits, as of the last arrange pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackGeometry {
    /// Distance from the grid origin.
    pub offset: f32,
    /// Size including padding, excluding margin.
    pub size: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutState {
    Unmeasured,
    Measured,
    Arranged,
}

/// A grid container: row and column definitions plus the state of the current layout pass.
///
/// The grid does not own its children; they are passed to [`Grid::measure`] and
/// [`Grid::arrange`] and addressed by their index in that slice.
pub struct Grid {
    rows: Vec<TrackDefinition>,
    columns: Vec<TrackDefinition>,
    spacing: GridSpacing,

    row_tracks: Vec<Track>,
    column_tracks: Vec<Track>,
    cells: Vec<Cell>,
    spans: SpanLedger,
    cache: MeasureCache,

    state: LayoutState,
    desired_size: Size,
    placements: Option<Vec<Placement>>,
    on_invalidate: Option<Box<dyn FnMut()>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("spacing", &self.spacing)
            .field("state", &self.state)
            .field("desired_size", &self.desired_size)
            .finish_non_exhaustive()
    }
}

impl Grid {
    /// Create a grid with no definitions: a single implicit star cell.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
            spacing: GridSpacing::default(),
            row_tracks: Vec::new(),
            column_tracks: Vec::new(),
            cells: Vec::new(),
            spans: SpanLedger::default(),
            cache: MeasureCache::new(),
            state: LayoutState::Unmeasured,
            desired_size: Size::zero(),
            placements: None,
            on_invalidate: None,
        }
    }

    pub fn with_spacing(mut self, spacing: GridSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = TrackDefinition>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = TrackDefinition>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn add_row(&mut self, definition: TrackDefinition) {
        self.rows.push(definition);
        self.invalidate_measure();
    }

    pub fn add_column(&mut self, definition: TrackDefinition) {
        self.columns.push(definition);
        self.invalidate_measure();
    }

    /// Edit the definitions of one axis. The grid is invalidated afterwards.
    pub fn edit_definitions<R>(
        &mut self,
        axis: Axis,
        edit: impl FnOnce(&mut Vec<TrackDefinition>) -> R,
    ) -> R {
        let result = match axis {
            Axis::Row => edit(&mut self.rows),
            Axis::Column => edit(&mut self.columns),
        };
        self.invalidate_measure();
        result
    }

    pub fn definitions(&self, axis: Axis) -> &[TrackDefinition] {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.columns,
        }
    }

    pub fn row_definitions(&self) -> &[TrackDefinition] {
        &self.rows
    }

    pub fn column_definitions(&self) -> &[TrackDefinition] {
        &self.columns
    }

    pub fn spacing(&self) -> GridSpacing {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: GridSpacing) {
        if self.spacing != spacing {
            self.spacing = spacing;
            self.invalidate_measure();
        }
    }

    /// Register the upward "invalidate my measurement" call.
    pub fn on_invalidate(&mut self, callback: impl FnMut() + 'static) {
        self.on_invalidate = Some(Box::new(callback));
    }

    /// Forget every cached measurement and require a new measure pass.
    ///
    /// Adding, removing or moving children is noticed by the next pass. Call this when
    /// children trade places without changing the cells they occupy.
    pub fn invalidate_measure(&mut self) {
        self.cache.advance_epoch();
        self.mark_unmeasured();
    }

    /// Forget the cached measurements of one child whose content changed.
    pub fn invalidate_child(&mut self, index: usize) {
        self.cache.forget_child(index);
        self.mark_unmeasured();
    }

    fn mark_unmeasured(&mut self) {
        self.state = LayoutState::Unmeasured;
        if let Some(callback) = self.on_invalidate.as_mut() {
            callback();
        }
    }

    /// Whether a measure pass has completed since the last invalidation.
    pub fn is_measure_valid(&self) -> bool {
        self.state != LayoutState::Unmeasured
    }

    /// Whether the last completed pass was an arrange pass.
    pub fn is_arranged(&self) -> bool {
        self.state == LayoutState::Arranged
    }

    /// Desired size computed by the last measure pass.
    pub fn desired_size(&self) -> Size {
        self.desired_size
    }

    pub fn cache_stats(&self) -> MeasureCacheStats {
        self.cache.stats()
    }

    /// Check every definition for negative, NaN or inverted bounds.
    ///
    /// Layout does not require this; it floors bad values instead.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for axis in [Axis::Row, Axis::Column] {
            for (index, definition) in self.definitions(axis).iter().enumerate() {
                definition
                    .check()
                    .map_err(|reason| LayoutError::InvalidDefinition {
                        axis,
                        index,
                        reason,
                    })?;
            }
        }
        Ok(())
    }

    /// Offset and size of every resolved track of `axis`, including an implicit one.
    pub fn track_geometry(&self, axis: Axis) -> Vec<TrackGeometry> {
        self.tracks(axis)
            .iter()
            .map(|track| TrackGeometry {
                offset: track.offset,
                size: track.full_size(),
            })
            .collect()
    }

    fn tracks(&self, axis: Axis) -> &[Track] {
        match axis {
            Axis::Row => &self.row_tracks,
            Axis::Column => &self.column_tracks,
        }
    }

    /// Measure every child and return the size the grid would like to have.
    pub fn measure<C: crate::GridChild>(&mut self, children: &mut [C], available: Size) -> Size {
        let placements: Vec<Placement> = children.iter().map(|child| child.placement()).collect();
        if self.placements.as_ref().is_some_and(|last| *last != placements) {
            debug!("Grid children changed since the last pass, dropping cached measurements");
            self.cache.advance_epoch();
        }
        self.placements = Some(placements);
        self.cache.begin_pass();

        debug!(
            "Grid measure: available {}x{}, {} rows, {} columns, {} children",
            available.width,
            available.height,
            self.rows.len(),
            self.columns.len(),
            children.len()
        );

        self.prepare(children, available);
        let desired = self.measure_cells(children, available);

        self.desired_size = desired;
        self.state = LayoutState::Measured;

        let stats = self.cache.stats();
        debug!(
            "Grid measure complete: desired {}x{}, cache {} hits / {} lookups",
            desired.width, desired.height, stats.hits, stats.lookups
        );
        desired
    }
}

/// Sum of every track's full size with margin.
pub(crate) fn total_extent(tracks: &[Track]) -> f32 {
    tracks.iter().map(Track::full_size_with_margin).sum()
}
