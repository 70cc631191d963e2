//! Layout lifecycle tests
//!
//! These tests verify that:
//! - Repeated passes reuse cached child measurements
//! - Invalidation clears the cache and notifies the owner
//! - Moved children and edited nested grids are measured again
//! - Resolved geometry is written back to the definitions
//! - Grids nest through `GridPanel`

use std::cell::Cell;
use std::rc::Rc;

use trellis_layout::{
    Axis, Grid, GridChild, GridLength, GridPanel, GridSpacing, LayoutError, Placement, Rect,
    Size, TrackDefinition,
};

use crate::support::{assert_near, assert_rect_near, init_tracing, SlotChild, TestChild};

fn two_fixed_columns() -> Grid {
    Grid::new()
        .with_rows([TrackDefinition::fixed(50.0)])
        .with_columns([TrackDefinition::fixed(100.0), TrackDefinition::fixed(100.0)])
}

#[test]
fn test_second_measure_served_from_cache() {
    init_tracing();
    let mut grid = two_fixed_columns();
    let mut children = vec![TestChild::new(10.0, 10.0), TestChild::new(10.0, 10.0).at(0, 1)];

    grid.measure(&mut children, Size::new(300.0, 100.0));
    grid.measure(&mut children, Size::new(300.0, 100.0));

    assert_eq!(children[0].measure_calls(), 1);
    assert_eq!(children[1].measure_calls(), 1);
    let stats = grid.cache_stats();
    assert_eq!(stats.lookups, 4);
    assert_eq!(stats.hits, 2);
}

#[test]
fn test_invalidate_child_remeasures_only_that_child() {
    let mut grid = two_fixed_columns();
    let mut children = vec![TestChild::new(10.0, 10.0), TestChild::new(10.0, 10.0).at(0, 1)];

    grid.measure(&mut children, Size::new(300.0, 100.0));
    grid.invalidate_child(1);
    assert!(!grid.is_measure_valid());

    grid.measure(&mut children, Size::new(300.0, 100.0));
    assert_eq!(children[0].measure_calls(), 1);
    assert_eq!(children[1].measure_calls(), 2);
}

#[test]
fn test_child_count_change_drops_cache() {
    let mut grid = two_fixed_columns();
    let mut children = vec![TestChild::new(10.0, 10.0)];

    grid.measure(&mut children, Size::new(300.0, 100.0));
    children.insert(0, TestChild::new(20.0, 20.0).at(0, 1));
    grid.measure(&mut children, Size::new(300.0, 100.0));

    // The original child moved to index 1; a stale answer for index 0 must not be reused.
    assert_eq!(children[0].measure_calls(), 1);
    assert_eq!(children[1].measure_calls(), 2);
}

#[test]
fn test_swapped_children_are_remeasured() {
    let mut grid = Grid::new()
        .with_rows([TrackDefinition::fixed(50.0)])
        .with_columns([TrackDefinition::auto(), TrackDefinition::auto()]);
    let mut children = vec![TestChild::new(10.0, 10.0), TestChild::new(20.0, 20.0).at(0, 1)];

    grid.measure(&mut children, Size::new(300.0, 100.0));
    children.swap(0, 1);
    grid.measure(&mut children, Size::new(300.0, 100.0));
    grid.arrange(&mut children, Size::new(300.0, 100.0));

    // Same count and proposals, so only the changed placements reveal the swap.
    assert_eq!(children[0].measure_calls(), 2);
    assert_eq!(children[1].measure_calls(), 2);
    let columns = grid.track_geometry(Axis::Column);
    assert_near(columns[0].size, 10.0);
    assert_near(columns[1].size, 20.0);
    assert_near(children[1].rect().right(), 10.0);
    assert_near(children[0].rect().right(), 30.0);
    assert_near(children[0].rect().bottom(), 50.0);
}

#[test]
fn test_edited_nested_grid_is_remeasured() {
    init_tracing();
    let mut grid = Grid::new().with_columns([TrackDefinition::auto()]);
    let mut children = vec![GridPanel::new(
        Grid::new().with_columns([TrackDefinition::fixed(30.0)]),
    )];

    let desired = grid.measure(&mut children, Size::new(500.0, 500.0));
    assert_near(desired.width, 30.0);
    assert!(!children[0].needs_measure());

    children[0].grid_mut().edit_definitions(Axis::Column, |columns| {
        columns[0].set_length(GridLength::fixed(60.0));
    });
    assert!(children[0].needs_measure());
    assert!(grid.is_measure_valid());

    let desired = grid.measure(&mut children, Size::new(500.0, 500.0));
    assert_near(desired.width, 60.0);
    assert!(!children[0].needs_measure());
}

/// A leaf whose width is changed from outside and which knows when it is out of date.
struct SharedWidthLeaf {
    width: Rc<Cell<f32>>,
    measured: Option<f32>,
}

impl GridChild for SharedWidthLeaf {
    fn needs_measure(&self) -> bool {
        self.measured != Some(self.width.get())
    }

    fn measure(&mut self, _available: Size) -> Size {
        self.measured = Some(self.width.get());
        Size::new(self.width.get(), 10.0)
    }

    fn arrange(&mut self, _rect: Rect) {}
}

#[test]
fn test_stale_leaf_inside_nested_grid_reaches_outer_grid() {
    let width = Rc::new(Cell::new(25.0));
    let leaf = SharedWidthLeaf {
        width: Rc::clone(&width),
        measured: None,
    };
    let middle =
        GridPanel::new(Grid::new().with_columns([TrackDefinition::auto()])).with_child(leaf);
    let mut grid = Grid::new().with_columns([TrackDefinition::auto()]);
    let mut children = vec![middle];

    let desired = grid.measure(&mut children, Size::INFINITY);
    assert_near(desired.width, 25.0);
    assert!(!children[0].needs_measure());

    width.set(45.0);
    assert!(children[0].grid().is_measure_valid());
    assert!(children[0].needs_measure());

    let desired = grid.measure(&mut children, Size::INFINITY);
    assert_near(desired.width, 45.0);
}

#[test]
fn test_invalidation_notifies_owner() {
    let notified = Rc::new(Cell::new(0));
    let mut grid = Grid::new();
    let counter = Rc::clone(&notified);
    grid.on_invalidate(move || counter.set(counter.get() + 1));

    grid.add_column(TrackDefinition::auto());
    assert_eq!(notified.get(), 1);

    grid.set_spacing(GridSpacing::default());
    assert_eq!(notified.get(), 1, "unchanged spacing must not invalidate");

    grid.set_spacing(GridSpacing::uniform(4.0, 4.0));
    assert_eq!(notified.get(), 2);

    grid.edit_definitions(Axis::Column, |columns| {
        columns[0].set_length(GridLength::fixed(30.0));
    });
    assert_eq!(notified.get(), 3);
}

#[test]
fn test_definition_edit_takes_effect() {
    let mut grid = Grid::new().with_columns([TrackDefinition::fixed(30.0)]);
    let mut children = vec![TestChild::new(10.0, 10.0)];

    let desired = grid.measure(&mut children, Size::INFINITY);
    assert_near(desired.width, 30.0);

    grid.edit_definitions(Axis::Column, |columns| {
        columns[0].set_length(GridLength::fixed(60.0));
    });
    let desired = grid.measure(&mut children, Size::INFINITY);
    assert_near(desired.width, 60.0);
    assert_eq!(children[0].measure_calls(), 2);
}

#[test]
fn test_arrange_writes_back_definitions() {
    let mut grid = Grid::new()
        .with_spacing(GridSpacing::uniform(0.0, 8.0))
        .with_columns([TrackDefinition::fixed(40.0), TrackDefinition::star(1.0)]);
    let mut children = vec![TestChild::new(10.0, 10.0)];

    grid.measure(&mut children, Size::new(200.0, 100.0));
    assert!(grid.is_measure_valid());
    assert!(!grid.is_arranged());

    grid.arrange(&mut children, Size::new(200.0, 100.0));
    assert!(grid.is_arranged());

    let columns = grid.column_definitions();
    assert_eq!(columns[0].actual_size(), 40.0);
    assert_eq!(columns[0].offset(), 0.0);
    assert_eq!(columns[1].actual_size(), 152.0);
    assert_eq!(columns[1].offset(), 48.0);
}

#[test]
fn test_validate_reports_bad_definition() {
    let grid = Grid::new()
        .with_rows([TrackDefinition::auto()])
        .with_columns([
            TrackDefinition::auto(),
            TrackDefinition::auto().with_min(50.0).with_max(10.0),
        ]);

    match grid.validate() {
        Err(LayoutError::InvalidDefinition { axis, index, .. }) => {
            assert_eq!(axis, Axis::Column);
            assert_eq!(index, 1);
        }
        other => panic!("expected an invalid column definition, got {other:?}"),
    }

    assert!(Grid::new().with_rows([TrackDefinition::fixed(5.0)]).validate().is_ok());
}

#[test]
fn test_bad_definitions_still_lay_out() {
    let mut grid = Grid::new().with_columns([
        TrackDefinition::fixed(-20.0),
        TrackDefinition::auto().with_min(-5.0),
    ]);
    let mut children = vec![TestChild::new(10.0, 10.0).at(0, 1)];

    let desired = grid.measure(&mut children, Size::INFINITY);
    assert_near(desired.width, 10.0);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "before Grid::measure")]
fn test_arrange_before_measure_panics_in_debug() {
    let mut grid = Grid::new();
    let mut children = vec![TestChild::new(10.0, 10.0)];
    grid.arrange(&mut children, Size::new(100.0, 100.0));
}

#[test]
fn test_nested_panel_lays_out_inside_star_column() {
    init_tracing();
    let (outer_leaf, outer_slot) = SlotChild::new(Placement::at(0, 0), 50.0, 50.0);
    let (top, top_slot) = SlotChild::new(Placement::at(0, 0), 30.0, 20.0);
    let (bottom, bottom_slot) = SlotChild::new(Placement::at(1, 0), 40.0, 10.0);

    let inner = GridPanel::new(
        Grid::new().with_rows([TrackDefinition::star(1.0), TrackDefinition::star(1.0)]),
    )
    .with_placement(Placement::at(0, 1))
    .with_child(top)
    .with_child(bottom);

    let mut outer = GridPanel::new(
        Grid::new().with_columns([TrackDefinition::fixed(100.0), TrackDefinition::star(1.0)]),
    )
    .with_child(outer_leaf)
    .with_child(inner);

    let final_size = outer.layout(Size::new(300.0, 200.0));

    assert_eq!(final_size, Size::new(300.0, 200.0));
    assert_near(outer.grid().desired_size().width, 140.0);
    assert_near(outer.grid().desired_size().height, 50.0);
    assert_rect_near(outer_slot.get().unwrap_or_default(), Rect::new(0.0, 0.0, 100.0, 200.0));
    assert_rect_near(top_slot.get().unwrap_or_default(), Rect::new(0.0, 0.0, 200.0, 100.0));
    assert_rect_near(
        bottom_slot.get().unwrap_or_default(),
        Rect::new(0.0, 100.0, 200.0, 100.0),
    );
}

#[test]
fn test_panel_layout_on_unbounded_space_uses_desired_size() {
    let (leaf, slot) = SlotChild::new(Placement::default(), 64.0, 32.0);
    let mut panel = GridPanel::new(Grid::new()).with_child(leaf);

    let final_size = panel.layout(Size::INFINITY);

    assert_eq!(final_size, Size::new(64.0, 32.0));
    assert_eq!(panel.bounds(), Rect::new(0.0, 0.0, 64.0, 32.0));
    assert_rect_near(slot.get().unwrap_or_default(), Rect::new(0.0, 0.0, 64.0, 32.0));
}

#[test]
fn test_panel_child_removal_invalidates() {
    let mut panel = GridPanel::new(Grid::new())
        .with_child(TestChild::new(10.0, 10.0))
        .with_child(TestChild::new(20.0, 20.0));
    panel.layout(Size::new(100.0, 100.0));
    assert!(panel.grid().is_arranged());

    assert!(panel.remove_child(1).is_some());
    assert!(panel.remove_child(5).is_none());
    assert!(!panel.grid().is_measure_valid());
    assert_eq!(panel.children().len(), 1);
}
