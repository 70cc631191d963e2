//! Resolved per-pass track state.

use crate::definition::{
    GridUnit, TrackDefinition, TrackPadding, MAX_DEFINITION_SIZE, MAX_STAR_WEIGHT,
};

bitflags::bitflags! {
    /// Set of sizing modes, used to classify the tracks a cell spans.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TrackKinds: u8 {
        /// Fixed pixel track.
        const FIXED = 0b001;
        /// Content-sized track.
        const AUTO  = 0b010;
        /// Proportional track.
        const STAR  = 0b100;
    }
}

impl From<GridUnit> for TrackKinds {
    fn from(unit: GridUnit) -> Self {
        match unit {
            GridUnit::Fixed => TrackKinds::FIXED,
            GridUnit::Auto => TrackKinds::AUTO,
            GridUnit::Star => TrackKinds::STAR,
        }
    }
}

/// A row or column as seen by one layout pass.
#[derive(Debug, Clone)]
pub(crate) struct Track {
    /// Declared unit; drives span resolution, star distribution and arrangement.
    pub unit: GridUnit,
    /// Unit used to classify cells. Star becomes Auto when the axis is unbounded.
    pub measure_kind: TrackKinds,
    /// Resolved floor, excluding padding for fixed tracks.
    pub min: f32,
    /// Resolved ceiling, excluding padding.
    pub max: f32,
    /// Smallest size satisfying every cell seen so far, excluding padding.
    pub current_min: f32,
    /// Star share handed out by the last distribution.
    pub measured_size: f32,
    pub star_weight: f32,
    /// Spacing to the next track.
    pub margin: f32,
    pub padding: TrackPadding,
    /// Distance from the grid origin, set during arrangement.
    pub offset: f32,
}

impl Track {
    /// The single star track synthesized for an axis without definitions.
    pub fn implicit(star_as_auto: bool) -> Self {
        Self {
            unit: GridUnit::Star,
            measure_kind: measure_kind(GridUnit::Star, star_as_auto),
            min: 0.0,
            max: f32::INFINITY,
            current_min: 0.0,
            measured_size: f32::INFINITY,
            star_weight: 1.0,
            margin: 0.0,
            padding: TrackPadding::default(),
            offset: 0.0,
        }
    }

    pub fn from_definition(definition: &TrackDefinition, margin: f32, star_as_auto: bool) -> Self {
        let length = definition.length();
        let padding = TrackPadding::new(
            definition.padding().leading.max(0.0),
            definition.padding().trailing.max(0.0),
        );
        let declared_max = definition.max().min(MAX_DEFINITION_SIZE);
        let mut min = definition.min().max(0.0);
        let mut star_weight = 0.0;

        match length.unit {
            GridUnit::Fixed => {
                min = min.max(length.value.max(0.0).min(declared_max));
                min = (min - padding.total()).max(0.0);
            }
            GridUnit::Auto => {}
            GridUnit::Star => star_weight = length.value.max(0.0).min(MAX_STAR_WEIGHT),
        }

        Self {
            unit: length.unit,
            measure_kind: measure_kind(length.unit, star_as_auto),
            min,
            max: (declared_max - padding.total()).max(0.0),
            current_min: min,
            measured_size: 0.0,
            star_weight,
            margin: margin.max(0.0),
            padding,
            offset: 0.0,
        }
    }

    pub fn is_star(&self) -> bool {
        self.unit == GridUnit::Star
    }

    pub fn is_auto(&self) -> bool {
        self.unit == GridUnit::Auto
    }

    pub fn full_size(&self) -> f32 {
        self.current_min + self.padding.total()
    }

    pub fn full_size_with_margin(&self) -> f32 {
        self.full_size() + self.margin
    }

    /// Size offered to a cell occupying only this track.
    pub fn proposal(&self) -> f32 {
        if self.is_star() {
            self.measured_size
        } else {
            self.current_min
        }
    }

    /// Record a single-track cell's desired size.
    ///
    /// The result never exceeds `max` and never shrinks below the current minimum.
    pub fn accommodate(&mut self, desired: f32) {
        if desired > self.max {
            self.current_min = self.max;
        } else if desired > self.current_min {
            self.current_min = desired;
        }
    }

    /// Space this track takes away from star distribution.
    pub fn consumed(&self) -> f32 {
        if self.is_star() {
            self.margin + self.padding.total()
        } else {
            self.full_size_with_margin()
        }
    }
}

fn measure_kind(unit: GridUnit, star_as_auto: bool) -> TrackKinds {
    if unit == GridUnit::Star && star_as_auto {
        TrackKinds::AUTO
    } else {
        TrackKinds::from(unit)
    }
}

/// Union of the measure kinds of `tracks[start..start + span]`.
pub(crate) fn span_kinds(tracks: &[Track], start: usize, span: usize) -> TrackKinds {
    tracks[start..start + span]
        .iter()
        .fold(TrackKinds::empty(), |kinds, track| kinds | track.measure_kind)
}
