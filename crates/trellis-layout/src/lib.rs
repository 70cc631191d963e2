//! # Trellis Layout
//!
//! Grid layout engine for the Trellis UI toolkit.
//!
//! ## Design Goals
//!
//! 1. **Track sizing**: Fixed, content-driven (`Auto`) and proportional (`Star`) rows and columns
//! 2. **Spanning**: Children covering several tracks grow those tracks within their bounds
//! 3. **Measure ordering**: Auto tracks are resolved before star space is handed out
//! 4. **Cheap re-layout**: Unchanged children are not measured twice for the same proposal
//! 5. **Nesting**: A grid can be a child of another grid
//!
//! ## Protocol
//!
//! Layout is two-phase. [`Grid::measure`] proposes a size to every child and returns the
//! grid's desired size. Once the parent decides the final size, [`Grid::arrange`] assigns
//! each child its cell rectangle.

pub mod definition;
pub mod grid;
pub mod measure_cache;
pub mod panel;

pub use definition::{GridLength, GridSpacing, GridUnit, TrackDefinition, TrackPadding};
pub use grid::{Grid, Placement, TrackGeometry};
pub use measure_cache::{MeasureCache, MeasureCacheStats};
pub use panel::GridPanel;

use thiserror::Error;

/// Errors that can occur while describing a grid.
///
/// Layout itself never fails; invalid placements are clamped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid grid length: {0:?}")]
    InvalidLength(String),

    #[error("Invalid {axis} definition {index}: {reason}")]
    InvalidDefinition {
        axis: Axis,
        index: usize,
        reason: String,
    },
}

/// Selects the rows or the columns of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Rows, sized along the vertical axis.
    Row,
    /// Columns, sized along the horizontal axis.
    Column,
}

impl Axis {
    /// Pick this axis' component out of a size.
    pub fn extent(self, size: Size) -> f32 {
        match self {
            Axis::Row => size.height,
            Axis::Column => size.width,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

/// A width/height pair. Either component may be `f32::INFINITY`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const INFINITY: Size = Size {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Rectangle for layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// An element that can be placed into a grid cell.
///
/// `measure` must be idempotent for a given proposal: the grid caches results and
/// may skip calls it has already answered.
pub trait GridChild {
    /// Attached row/column placement. Defaults to the top-left cell.
    fn placement(&self) -> Placement {
        Placement::default()
    }

    /// Whether a cached answer for this child is stale.
    ///
    /// Containers whose own layout was invalidated return `true` so the parent
    /// measures them again instead of reusing an old desired size.
    fn needs_measure(&self) -> bool {
        false
    }

    /// Measure with a proposed size and return the desired size.
    fn measure(&mut self, available: Size) -> Size;

    /// Finalize placement into `rect`, relative to the grid origin.
    fn arrange(&mut self, rect: Rect);
}

impl<T: GridChild + ?Sized> GridChild for Box<T> {
    fn placement(&self) -> Placement {
        (**self).placement()
    }

    fn needs_measure(&self) -> bool {
        (**self).needs_measure()
    }

    fn measure(&mut self, available: Size) -> Size {
        (**self).measure(available)
    }

    fn arrange(&mut self, rect: Rect) {
        (**self).arrange(rect)
    }
}
