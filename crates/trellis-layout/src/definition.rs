//! Row and column definitions.
//!
//! A [`TrackDefinition`] is the declared, user-facing description of one row or column.
//! The grid reads it at the start of every measure pass and writes the resolved
//! size and offset back during arrangement so other controls (splitters, rulers)
//! can read the current track geometry.

use std::fmt;
use std::str::FromStr;

use crate::LayoutError;

/// Upper bound for a star weight.
pub(crate) const MAX_STAR_WEIGHT: f32 = 1e30;

/// Upper bound for any declared maximum.
pub(crate) const MAX_DEFINITION_SIZE: f32 = 1e27;

/// How a track is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GridUnit {
    /// Exact pixel size.
    Fixed,
    /// Sized to the largest child placed in it.
    Auto,
    /// Share of the space left over after fixed and auto tracks.
    #[default]
    Star,
}

/// Declared size of a track: a value and the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLength {
    pub value: f32,
    pub unit: GridUnit,
}

impl GridLength {
    pub fn fixed(px: f32) -> Self {
        Self {
            value: px,
            unit: GridUnit::Fixed,
        }
    }

    pub fn auto() -> Self {
        Self {
            value: 0.0,
            unit: GridUnit::Auto,
        }
    }

    pub fn star(weight: f32) -> Self {
        Self {
            value: weight,
            unit: GridUnit::Star,
        }
    }

    pub fn is_auto(&self) -> bool {
        self.unit == GridUnit::Auto
    }

    pub fn is_star(&self) -> bool {
        self.unit == GridUnit::Star
    }
}

impl Default for GridLength {
    fn default() -> Self {
        Self::star(1.0)
    }
}

impl FromStr for GridLength {
    type Err = LayoutError;

    /// Parse `"Auto"`, `"120"`, `"*"` or `"2.5*"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::auto());
        }

        let invalid = || LayoutError::InvalidLength(s.to_string());

        if let Some(weight) = trimmed.strip_suffix('*') {
            let weight = weight.trim();
            if weight.is_empty() {
                return Ok(Self::star(1.0));
            }
            let value: f32 = weight.parse().map_err(|_| invalid())?;
            if !value.is_finite() || value < 0.0 {
                return Err(invalid());
            }
            return Ok(Self::star(value));
        }

        let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed);
        let value: f32 = trimmed.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        Ok(Self::fixed(value))
    }
}

impl fmt::Display for GridLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            GridUnit::Auto => f.write_str("Auto"),
            GridUnit::Fixed => write!(f, "{}", self.value),
            GridUnit::Star if self.value == 1.0 => f.write_str("*"),
            GridUnit::Star => write!(f, "{}*", self.value),
        }
    }
}

/// Padding of a track, split into the side facing the grid origin and the far side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackPadding {
    /// Top for rows, left for columns.
    pub leading: f32,
    /// Bottom for rows, right for columns.
    pub trailing: f32,
}

impl TrackPadding {
    pub fn new(leading: f32, trailing: f32) -> Self {
        Self { leading, trailing }
    }

    pub fn uniform(value: f32) -> Self {
        Self::new(value, value)
    }

    pub fn total(&self) -> f32 {
        self.leading + self.trailing
    }
}

/// Declared description of one row or column.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackDefinition {
    length: GridLength,
    min: f32,
    max: f32,
    margin: f32,
    padding: TrackPadding,
    actual_size: f32,
    offset: f32,
}

impl Default for TrackDefinition {
    fn default() -> Self {
        Self::new(GridLength::default())
    }
}

impl TrackDefinition {
    pub fn new(length: GridLength) -> Self {
        Self {
            length,
            min: 0.0,
            max: f32::INFINITY,
            margin: 0.0,
            padding: TrackPadding::default(),
            actual_size: 0.0,
            offset: 0.0,
        }
    }

    pub fn fixed(px: f32) -> Self {
        Self::new(GridLength::fixed(px))
    }

    pub fn auto() -> Self {
        Self::new(GridLength::auto())
    }

    pub fn star(weight: f32) -> Self {
        Self::new(GridLength::star(weight))
    }

    pub fn with_min(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub fn with_max(mut self, max: f32) -> Self {
        self.max = max;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_padding(mut self, padding: TrackPadding) -> Self {
        self.padding = padding;
        self
    }

    pub fn length(&self) -> GridLength {
        self.length
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn padding(&self) -> TrackPadding {
        self.padding
    }

    pub fn set_length(&mut self, length: GridLength) {
        self.length = length;
    }

    pub fn set_min(&mut self, min: f32) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: f32) {
        self.max = max;
    }

    pub fn set_margin(&mut self, margin: f32) {
        self.margin = margin;
    }

    pub fn set_padding(&mut self, padding: TrackPadding) {
        self.padding = padding;
    }

    /// Size of the track including its padding, as of the last arrange pass.
    pub fn actual_size(&self) -> f32 {
        self.actual_size
    }

    /// Distance from the grid origin, as of the last arrange pass.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub(crate) fn publish(&mut self, actual_size: f32, offset: f32) {
        self.actual_size = actual_size;
        self.offset = offset;
    }

    /// Report the first value that cannot describe a track.
    pub(crate) fn check(&self) -> Result<(), String> {
        let non_negative = [
            ("length", self.length.value),
            ("min", self.min),
            ("max", self.max),
            ("margin", self.margin),
            ("leading padding", self.padding.leading),
            ("trailing padding", self.padding.trailing),
        ];
        for (name, value) in non_negative {
            if value.is_nan() {
                return Err(format!("{name} is NaN"));
            }
            if value < 0.0 {
                return Err(format!("{name} is negative ({value})"));
            }
        }
        if self.min > self.max {
            return Err(format!("min {} exceeds max {}", self.min, self.max));
        }
        Ok(())
    }
}

/// Grid-wide spacing between tracks.
///
/// Unless the matching `individual_*` flag is set, every track of an axis uses the
/// uniform spacing as its margin and the per-definition margin is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridSpacing {
    pub row_spacing: f32,
    pub column_spacing: f32,
    pub individual_row_spacing: bool,
    pub individual_column_spacing: bool,
}

impl GridSpacing {
    pub fn uniform(row_spacing: f32, column_spacing: f32) -> Self {
        Self {
            row_spacing,
            column_spacing,
            ..Self::default()
        }
    }

    /// Margin to the next track for `definition`.
    pub(crate) fn margin_for(&self, axis: crate::Axis, definition: &TrackDefinition) -> f32 {
        match axis {
            crate::Axis::Row if self.individual_row_spacing => definition.margin(),
            crate::Axis::Row => self.row_spacing,
            crate::Axis::Column if self.individual_column_spacing => definition.margin(),
            crate::Axis::Column => self.column_spacing,
        }
    }
}
