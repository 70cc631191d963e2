//! Integration tests for the grid layout engine
//!
//! - `track_sizing`: how definitions and content size rows and columns
//! - `spacing`: uniform and individual spacing, track padding
//! - `lifecycle`: invalidation, caching, definition write-back, nested grids

mod lifecycle;
