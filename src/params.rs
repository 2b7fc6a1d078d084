//! The parameter record that configures one generation run.
//!
//! Field names serialize in camelCase so a record round-trips through the
//! JSON export format and the preset store unchanged.

use crate::drawing::Point;
use crate::error::{BendError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// How segment lengths are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthMode {
    Fixed,
    #[default]
    Random,
}

/// How the heading changes between segments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Fixed,
    Random,
}

/// How segment colors are chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Fixed,
    #[default]
    Random,
    /// Accepted for compatibility; colors exactly like [`ColorMode::Random`].
    Gradient,
}

/// The 10-color palettes available to random coloring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPalette {
    #[default]
    Pastel,
    Bold,
    Monochrome,
}

impl ColorPalette {
    /// Resolves a palette by name. Unknown names fall back to pastel.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bold" => Self::Bold,
            "monochrome" => Self::Monochrome,
            _ => Self::Pastel,
        }
    }
}

impl<'de> Deserialize<'de> for ColorPalette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Which test ends a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoppingKind {
    /// Stop once the cursor is within `min_distance` of the start point.
    Distance,
    /// Stop after `max_lines` segments.
    #[default]
    Count,
    /// Stop once the cursor returns to within 2 units of the start point on
    /// both axes, after at least two segments.
    Exact,
}

/// Full configuration of a run. Read-only while the run is in flight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingParameters {
    // --- Length ---
    pub length_mode: LengthMode,
    pub fixed_length: f64,
    pub min_length: f64,
    pub max_length: f64,

    // --- Angle (degrees) ---
    pub angle_mode: AngleMode,
    pub fixed_angle: f64,
    pub min_angle: f64,
    pub max_angle: f64,

    // --- Color ---
    pub color_mode: ColorMode,
    pub fixed_color: String,
    pub color_palette: ColorPalette,

    // --- Stopping ---
    pub stopping_condition: StoppingKind,
    pub min_distance: f64,
    pub max_lines: usize,

    // --- Canvas ---
    pub start_point: Point,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for DrawingParameters {
    fn default() -> Self {
        Self {
            length_mode: LengthMode::Random,
            fixed_length: 50.0,
            min_length: 20.0,
            max_length: 100.0,
            angle_mode: AngleMode::Fixed,
            fixed_angle: 45.0,
            min_angle: 30.0,
            max_angle: 60.0,
            color_mode: ColorMode::Random,
            fixed_color: "#000000".to_string(),
            color_palette: ColorPalette::Pastel,
            stopping_condition: StoppingKind::Count,
            min_distance: 20.0,
            max_lines: 100,
            start_point: Point::new(400.0, 300.0),
            canvas_width: 800.0,
            canvas_height: 600.0,
        }
    }
}

impl DrawingParameters {
    /// Checks the record before it is persisted or handed to a renderer.
    ///
    /// The engine does not call this and tolerates every record, including
    /// inverted `min`/`max` ranges, which are therefore not rejected here.
    pub fn validate(&self) -> Result<()> {
        let numeric = [
            ("fixedLength", self.fixed_length),
            ("minLength", self.min_length),
            ("maxLength", self.max_length),
            ("fixedAngle", self.fixed_angle),
            ("minAngle", self.min_angle),
            ("maxAngle", self.max_angle),
            ("minDistance", self.min_distance),
            ("startPoint.x", self.start_point.x),
            ("startPoint.y", self.start_point.y),
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
        ];
        if let Some((name, value)) = numeric.iter().find(|(_, v)| !v.is_finite()) {
            return Err(BendError::InvalidParameters(format!(
                "{name} must be finite, got {value}"
            )));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(BendError::InvalidParameters(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        Ok(())
    }

    /// True when a random mode is paired with an empty or inverted range.
    pub fn has_degenerate_range(&self) -> bool {
        let length = self.length_mode == LengthMode::Random && self.max_length <= self.min_length;
        let angle = self.angle_mode == AngleMode::Random && self.max_angle <= self.min_angle;
        length || angle
    }
}
