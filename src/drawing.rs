use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A plain 2D coordinate in canvas space (y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_glam(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_glam(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        self.to_glam().distance(other.to_glam())
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self::from_glam(v)
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        p.to_glam()
    }
}

/// One emitted line of the drawing.
///
/// Segments are derived entirely from the cursor at creation time and never
/// change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,

    /// Distance travelled along the heading.
    pub length: f64,

    /// Absolute heading in degrees. Accumulates across turns and is never
    /// wrapped into `[0, 360)`.
    pub angle: f64,

    /// CSS color string, e.g. `#FFB3BA`.
    pub color: String,
}

/// Why a run reached its terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    /// The configured stopping policy reported termination.
    PolicyStopped,
    /// The engine's segment ceiling forced completion.
    SafetyLimitReached,
}

/// Mutable record of one generation run.
///
/// Starts Running at the configured start point with a zero heading. Moves to
/// Complete exactly once, and from then on no more segments are produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationState {
    /// Segments in drawing order. Only ever appended to.
    pub segments: Vec<Segment>,

    /// Where the next segment will start.
    pub current_point: Point,

    /// Absolute heading accumulator in degrees.
    pub current_angle: f64,

    pub is_complete: bool,

    /// Number of segments generated so far.
    pub total_lines: usize,

    /// Set together with `is_complete`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
}

impl GenerationState {
    /// A fresh Running state anchored at `start`.
    pub fn new(start: Point) -> Self {
        Self {
            segments: Vec::new(),
            current_point: start,
            current_angle: 0.0,
            is_complete: false,
            total_lines: 0,
            stop_reason: None,
        }
    }

    /// Moves the state to Complete. A state that is already complete keeps
    /// its original reason.
    pub fn complete(&mut self, reason: StopReason) {
        if self.is_complete {
            return;
        }
        self.is_complete = true;
        self.stop_reason = Some(reason);
    }

    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Sum of all segment lengths.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| s.length).sum()
    }
}
