use crate::drawing::GenerationState;
use crate::params::{DrawingParameters, StoppingKind};

/// Per-axis tolerance, in canvas units, for [`StoppingPolicy::Exact`].
pub const EXACT_TOLERANCE: f64 = 2.0;

/// Decides, before each candidate segment, whether the run is over.
///
/// A stopping policy only gates the loop. It never removes a segment that has
/// already been produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoppingPolicy {
    /// Cursor within `min_distance` of the start point.
    ///
    /// The cursor sits on the start point before the first segment, so any
    /// non-negative `min_distance` halts the run with zero segments.
    Distance,
    /// `total_lines >= max_lines`.
    Count,
    /// Cursor within [`EXACT_TOLERANCE`] of the start point on both axes,
    /// once more than one segment has been drawn.
    Exact,
}

impl StoppingPolicy {
    pub fn from_params(params: &DrawingParameters) -> Self {
        match params.stopping_condition {
            StoppingKind::Distance => Self::Distance,
            StoppingKind::Count => Self::Count,
            StoppingKind::Exact => Self::Exact,
        }
    }

    pub fn should_stop(&self, state: &GenerationState, params: &DrawingParameters) -> bool {
        let start = params.start_point;
        let here = state.current_point;
        match self {
            Self::Distance => here.distance(start) <= params.min_distance,
            Self::Count => state.total_lines >= params.max_lines,
            Self::Exact => {
                (here.x - start.x).abs() <= EXACT_TOLERANCE
                    && (here.y - start.y).abs() <= EXACT_TOLERANCE
                    && state.total_lines > 1
            }
        }
    }
}
