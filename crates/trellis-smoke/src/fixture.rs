//! JSON description of a grid and its leaf children.

use anyhow::{Context, Result};
use serde::Deserialize;
use trellis_layout::{
    Grid, GridChild, GridLength, GridSpacing, Placement, Rect, Size, TrackDefinition,
    TrackPadding,
};

/// Layout used when no `--layout-file` is given.
pub const DEMO_FIXTURE: &str = include_str!("../fixtures/demo.json");

#[derive(Debug, Clone, Deserialize)]
pub struct GridFixture {
    #[serde(default)]
    pub row_spacing: f32,
    #[serde(default)]
    pub column_spacing: f32,
    #[serde(default)]
    pub individual_row_spacing: bool,
    #[serde(default)]
    pub individual_column_spacing: bool,
    #[serde(default)]
    pub rows: Vec<TrackFixture>,
    #[serde(default)]
    pub columns: Vec<TrackFixture>,
    #[serde(default)]
    pub children: Vec<ChildFixture>,
}

/// One row or column. `size` uses the `"Auto"` / `"120"` / `"2*"` notation.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackFixture {
    #[serde(default = "star")]
    pub size: String,
    #[serde(default)]
    pub min: Option<f32>,
    #[serde(default)]
    pub max: Option<f32>,
    #[serde(default)]
    pub margin: f32,
    /// Leading and trailing padding.
    #[serde(default)]
    pub padding: Option<[f32; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildFixture {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub row: usize,
    #[serde(default)]
    pub column: usize,
    #[serde(default = "one")]
    pub row_span: usize,
    #[serde(default = "one")]
    pub column_span: usize,
    pub width: f32,
    pub height: f32,
}

fn star() -> String {
    "*".to_string()
}

fn one() -> usize {
    1
}

impl GridFixture {
    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Failed to parse grid fixture")
    }

    pub fn demo() -> Result<Self> {
        Self::from_json(DEMO_FIXTURE).context("Built-in demo fixture is invalid")
    }

    /// Build the grid, rejecting definitions that cannot describe a track.
    pub fn build_grid(&self) -> Result<Grid> {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, track)| track.definition().with_context(|| format!("row {index}")))
            .collect::<Result<Vec<_>>>()?;
        let columns = self
            .columns
            .iter()
            .enumerate()
            .map(|(index, track)| track.definition().with_context(|| format!("column {index}")))
            .collect::<Result<Vec<_>>>()?;

        let grid = Grid::new()
            .with_spacing(GridSpacing {
                row_spacing: self.row_spacing,
                column_spacing: self.column_spacing,
                individual_row_spacing: self.individual_row_spacing,
                individual_column_spacing: self.individual_column_spacing,
            })
            .with_rows(rows)
            .with_columns(columns);
        grid.validate()?;
        Ok(grid)
    }

    pub fn build_children(&self) -> Vec<FixtureChild> {
        self.children
            .iter()
            .enumerate()
            .map(|(index, child)| FixtureChild {
                name: child
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("child-{index}")),
                placement: Placement {
                    row: child.row,
                    column: child.column,
                    row_span: child.row_span,
                    column_span: child.column_span,
                },
                intrinsic: Size::new(child.width, child.height),
                rect: None,
            })
            .collect()
    }
}

impl TrackFixture {
    pub fn definition(&self) -> Result<TrackDefinition> {
        let length: GridLength = self.size.parse()?;
        let mut definition = TrackDefinition::new(length).with_margin(self.margin);
        if let Some(min) = self.min {
            definition = definition.with_min(min);
        }
        if let Some(max) = self.max {
            definition = definition.with_max(max);
        }
        if let Some([leading, trailing]) = self.padding {
            definition = definition.with_padding(TrackPadding::new(leading, trailing));
        }
        Ok(definition)
    }
}

/// A leaf that always asks for its fixture size.
#[derive(Debug, Clone)]
pub struct FixtureChild {
    pub name: String,
    pub placement: Placement,
    pub intrinsic: Size,
    pub rect: Option<Rect>,
}

impl GridChild for FixtureChild {
    fn placement(&self) -> Placement {
        self.placement
    }

    fn measure(&mut self, _available: Size) -> Size {
        self.intrinsic
    }

    fn arrange(&mut self, rect: Rect) {
        self.rect = Some(rect);
    }
}
