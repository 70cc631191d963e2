//! A grid bundled with its children, usable as a child of another grid.
//!
//! Measuring a panel runs a complete measure pass of its inner grid, so nested grids
//! are laid out re-entrantly: the inner pass finishes before the outer one continues.
//! A panel whose grid or children went stale reports it through
//! [`GridChild::needs_measure`], so the outer grid asks it again.

use crate::{Axis, Grid, GridChild, Placement, Rect, Size};

/// A [`Grid`] that owns its children.
#[derive(Default)]
pub struct GridPanel {
    grid: Grid,
    children: Vec<Box<dyn GridChild>>,
    placement: Placement,
    bounds: Rect,
}

impl std::fmt::Debug for GridPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridPanel")
            .field("grid", &self.grid)
            .field("children", &self.children.len())
            .field("placement", &self.placement)
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl GridPanel {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Where this panel sits when placed inside another grid.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_child(mut self, child: impl GridChild + 'static) -> Self {
        self.push_child(child);
        self
    }

    pub fn push_child(&mut self, child: impl GridChild + 'static) {
        self.children.push(Box::new(child));
        self.grid.invalidate_measure();
    }

    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn GridChild>> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        self.grid.invalidate_measure();
        Some(child)
    }

    pub fn children(&self) -> &[Box<dyn GridChild>] {
        &self.children
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Rectangle assigned by the last arrange, relative to the parent grid.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Measure and arrange as the root of a layout tree.
    ///
    /// Unbounded dimensions of `available` are replaced by the desired size.
    pub fn layout(&mut self, available: Size) -> Size {
        let desired = self.measure(available);
        let settle = |axis: Axis| {
            let extent = axis.extent(available);
            if extent.is_finite() {
                extent
            } else {
                axis.extent(desired)
            }
        };
        let final_size = Size::new(settle(Axis::Column), settle(Axis::Row));
        self.arrange(Rect::from_size(final_size));
        final_size
    }
}

impl GridChild for GridPanel {
    fn placement(&self) -> Placement {
        self.placement
    }

    fn needs_measure(&self) -> bool {
        !self.grid.is_measure_valid() || self.children.iter().any(|child| child.needs_measure())
    }

    fn measure(&mut self, available: Size) -> Size {
        self.grid.measure(&mut self.children, available)
    }

    fn arrange(&mut self, rect: Rect) {
        self.bounds = rect;
        self.grid.arrange(&mut self.children, rect.size());
    }
}
