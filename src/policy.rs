//! Length, angle and color policies.
//!
//! Each family is a closed enum selected from [`DrawingParameters`]. Random
//! variants draw from a caller-supplied [`Rng`].

use crate::params::{AngleMode, ColorMode, ColorPalette, DrawingParameters, LengthMode};
use rand::Rng;

pub const PASTEL_COLORS: [&str; 10] = [
    "#FFB3BA", "#FFDFBA", "#FFFFBA", "#BAFFC9", "#BAE1FF",
    "#FFB3E6", "#E6B3FF", "#B3D9FF", "#B3FFB3", "#FFCCB3",
];

pub const BOLD_COLORS: [&str; 10] = [
    "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF",
    "#00FFFF", "#FFA500", "#800080", "#FFC0CB", "#A52A2A",
];

pub const MONOCHROME_COLORS: [&str; 10] = [
    "#000000", "#1A1A1A", "#333333", "#4D4D4D", "#666666",
    "#808080", "#999999", "#B3B3B3", "#CCCCCC", "#E6E6E6",
];

impl ColorPalette {
    pub fn colors(self) -> &'static [&'static str; 10] {
        match self {
            Self::Pastel => &PASTEL_COLORS,
            Self::Bold => &BOLD_COLORS,
            Self::Monochrome => &MONOCHROME_COLORS,
        }
    }
}

/// Redraws allowed when a float draw rounds up onto the excluded bound.
const UNIFORM_RETRIES: usize = 8;

/// Uniform draw from `[min, max)`.
///
/// An empty, inverted or non-finite range is a degenerate draw that yields
/// `min` without touching the generator. On ranges only a few ulps wide the
/// float draw can round up to `max`; such draws are redrawn, and `min` is
/// returned if every retry lands on `max`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    let width = max - min;
    if !(width.is_finite() && width > 0.0 && min.is_finite()) {
        return min;
    }
    for _ in 0..UNIFORM_RETRIES {
        let value = rng.random_range(min..max);
        if value < max {
            return value;
        }
    }
    min
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthPolicy {
    /// Always `fixed_length`.
    Fixed,
    /// Uniform in `[min_length, max_length)`.
    Random,
}

impl LengthPolicy {
    pub fn from_params(params: &DrawingParameters) -> Self {
        match params.length_mode {
            LengthMode::Fixed => Self::Fixed,
            LengthMode::Random => Self::Random,
        }
    }

    pub fn length<R: Rng + ?Sized>(&self, params: &DrawingParameters, rng: &mut R) -> f64 {
        match self {
            Self::Fixed => params.fixed_length,
            Self::Random => uniform(rng, params.min_length, params.max_length),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnglePolicy {
    /// Turn by `fixed_angle` every step.
    Fixed,
    /// Turn by a uniform amount in `[min_angle, max_angle)` every step.
    Random,
}

impl AnglePolicy {
    pub fn from_params(params: &DrawingParameters) -> Self {
        match params.angle_mode {
            AngleMode::Fixed => Self::Fixed,
            AngleMode::Random => Self::Random,
        }
    }

    /// Returns the new absolute heading, not the delta.
    pub fn angle<R: Rng + ?Sized>(
        &self,
        params: &DrawingParameters,
        current_angle: f64,
        rng: &mut R,
    ) -> f64 {
        let delta = match self {
            Self::Fixed => params.fixed_angle,
            Self::Random => uniform(rng, params.min_angle, params.max_angle),
        };
        current_angle + delta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorPolicy {
    Fixed,
    /// Uniform pick from the configured palette.
    Random,
}

impl ColorPolicy {
    pub fn from_params(params: &DrawingParameters) -> Self {
        match params.color_mode {
            ColorMode::Fixed => Self::Fixed,
            ColorMode::Random | ColorMode::Gradient => Self::Random,
        }
    }

    /// `_line_index` is the index of the segment being colored. No policy
    /// reads it yet.
    pub fn color<R: Rng + ?Sized>(
        &self,
        params: &DrawingParameters,
        _line_index: usize,
        rng: &mut R,
    ) -> String {
        match self {
            Self::Fixed => params.fixed_color.clone(),
            Self::Random => {
                let palette = params.color_palette.colors();
                palette[rng.random_range(0..palette.len())].to_string()
            }
        }
    }
}
