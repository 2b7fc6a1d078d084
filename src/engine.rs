//! Engine that walks the bend turtle and produces a [`GenerationState`].
//!
//! The entry point is [`BendEngine`]. Build it from a [`DrawingParameters`]
//! record, then either drive it one segment at a time with
//! [`BendEngine::step`] or produce a whole drawing with [`BendEngine::run`].

use crate::drawing::{GenerationState, Segment, StopReason};
use crate::params::DrawingParameters;
use crate::policy::{AnglePolicy, ColorPolicy, LengthPolicy};
use crate::stopping::StoppingPolicy;
use crate::turtle::BendTurtle;
use rand::Rng;
use tracing::{debug, warn};

/// Configuration for the generation loop.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Hard ceiling on segments per run. Reaching it forces completion.
    pub max_segments: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_segments: 10_000,
        }
    }
}

/// The four policies selected from one parameter record.
///
/// A bundle is immutable once built. Changing parameters means building a new
/// bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolicyBundle {
    pub length: LengthPolicy,
    pub angle: AnglePolicy,
    pub color: ColorPolicy,
    pub stopping: StoppingPolicy,
}

impl PolicyBundle {
    pub fn from_params(params: &DrawingParameters) -> Self {
        if params.has_degenerate_range() {
            warn!(
                min_length = params.min_length,
                max_length = params.max_length,
                min_angle = params.min_angle,
                max_angle = params.max_angle,
                "empty or inverted random range; draws will return the minimum"
            );
        }
        Self {
            length: LengthPolicy::from_params(params),
            angle: AnglePolicy::from_params(params),
            color: ColorPolicy::from_params(params),
            stopping: StoppingPolicy::from_params(params),
        }
    }

    /// Produces the next segment and advances the cursor in `state`.
    ///
    /// The segment is returned, not appended. Returns `None` once `state` is
    /// complete, including when this call is the one that completes it.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        state: &mut GenerationState,
        params: &DrawingParameters,
        rng: &mut R,
    ) -> Option<Segment> {
        if state.is_complete {
            return None;
        }
        if self.stopping.should_stop(state, params) {
            state.complete(StopReason::PolicyStopped);
            return None;
        }

        let mut turtle = BendTurtle::new(state.current_point, state.current_angle);
        let start = turtle.point();

        let length = self.length.length(params, rng);
        let heading = self.angle.angle(params, turtle.heading, rng);
        turtle.advance(length, heading);
        let color = self.color.color(params, state.total_lines, rng);

        let end = turtle.point();
        state.current_point = end;
        state.current_angle = heading;
        state.total_lines += 1;

        Some(Segment {
            start,
            end,
            length,
            angle: heading,
            color,
        })
    }
}

/// Generates bend drawings from a parameter record.
pub struct BendEngine {
    policies: PolicyBundle,
    config: EngineConfig,
}

impl BendEngine {
    /// Creates an engine with policies selected from `params` and the default
    /// [`EngineConfig`].
    pub fn new(params: &DrawingParameters) -> Self {
        Self::with_config(params, EngineConfig::default())
    }

    pub fn with_config(params: &DrawingParameters, config: EngineConfig) -> Self {
        Self {
            policies: PolicyBundle::from_params(params),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The policies used by [`step`](Self::step).
    pub fn policies(&self) -> &PolicyBundle {
        &self.policies
    }

    /// Re-selects the step policies after the parameters changed.
    pub fn update_policies(&mut self, params: &DrawingParameters) {
        self.policies = PolicyBundle::from_params(params);
    }

    /// A fresh Running state at `params.start_point` with a zero heading.
    pub fn reset(&self, params: &DrawingParameters) -> GenerationState {
        GenerationState::new(params.start_point)
    }

    /// Generates one segment using the thread-local generator.
    ///
    /// See [`step_with_rng`](Self::step_with_rng).
    pub fn step(&self, state: &mut GenerationState, params: &DrawingParameters) -> Option<Segment> {
        self.step_with_rng(state, params, &mut rand::rng())
    }

    /// Generates one segment with the engine's current policies.
    ///
    /// The caller is responsible for appending the returned segment to
    /// `state.segments`. The safety ceiling is enforced by [`run`](Self::run),
    /// not here.
    pub fn step_with_rng<R: Rng + ?Sized>(
        &self,
        state: &mut GenerationState,
        params: &DrawingParameters,
        rng: &mut R,
    ) -> Option<Segment> {
        self.policies.advance(state, params, rng)
    }

    /// Runs a full generation using the thread-local generator.
    pub fn run(&self, params: &DrawingParameters) -> GenerationState {
        self.run_with_rng(params, &mut rand::rng())
    }

    /// Runs a full generation from reset to completion.
    ///
    /// Policies are selected afresh from `params` for this run, so the result
    /// never depends on an earlier [`update_policies`](Self::update_policies).
    ///
    /// # Safety ceiling
    ///
    /// Once `max_segments` segments exist the run is forced complete. The
    /// reason is [`StopReason::PolicyStopped`] if the stopping policy would
    /// have stopped there anyway, otherwise [`StopReason::SafetyLimitReached`].
    pub fn run_with_rng<R: Rng + ?Sized>(
        &self,
        params: &DrawingParameters,
        rng: &mut R,
    ) -> GenerationState {
        let policies = PolicyBundle::from_params(params);
        let mut state = self.reset(params);

        while !state.is_complete {
            if state.total_lines >= self.config.max_segments {
                if policies.stopping.should_stop(&state, params) {
                    state.complete(StopReason::PolicyStopped);
                } else {
                    warn!(
                        max_segments = self.config.max_segments,
                        stopping = ?policies.stopping,
                        "segment ceiling reached; forcing completion"
                    );
                    state.complete(StopReason::SafetyLimitReached);
                }
                break;
            }
            if let Some(segment) = policies.advance(&mut state, params, rng) {
                state.push_segment(segment);
            }
        }

        debug!(
            segments = state.segments.len(),
            total_length = state.total_length(),
            reason = ?state.stop_reason,
            "generation complete"
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AngleMode, LengthMode, StoppingKind};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn count_params(max_lines: usize) -> DrawingParameters {
        DrawingParameters {
            length_mode: LengthMode::Fixed,
            angle_mode: AngleMode::Fixed,
            stopping_condition: StoppingKind::Count,
            max_lines,
            ..Default::default()
        }
    }

    #[test]
    fn step_does_not_append() {
        let params = count_params(5);
        let engine = BendEngine::new(&params);
        let mut state = engine.reset(&params);

        let segment = engine.step(&mut state, &params);
        assert!(segment.is_some());
        assert!(state.segments.is_empty());
        assert_eq!(state.total_lines, 1);
    }

    #[test]
    fn step_on_complete_state_is_a_no_op() {
        let params = count_params(0);
        let engine = BendEngine::new(&params);
        let mut state = engine.reset(&params);

        assert_eq!(engine.step(&mut state, &params), None);
        assert!(state.is_complete);
        assert_eq!(state.stop_reason, Some(StopReason::PolicyStopped));

        let snapshot = state.clone();
        assert_eq!(engine.step(&mut state, &params), None);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn segment_chain_is_connected() {
        let params = DrawingParameters {
            angle_mode: AngleMode::Random,
            ..count_params(50)
        };
        let mut rng = StdRng::seed_from_u64(3);
        let state = BendEngine::new(&params).run_with_rng(&params, &mut rng);

        assert_eq!(state.segments[0].start, params.start_point);
        for pair in state.segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(state.segments.last().map(|s| s.end), Some(state.current_point));
    }

    #[test]
    fn ceiling_forces_completion() {
        let params = DrawingParameters {
            stopping_condition: StoppingKind::Exact,
            fixed_angle: 1.0,
            fixed_length: 1000.0,
            ..count_params(0)
        };
        let engine = BendEngine::with_config(&params, EngineConfig { max_segments: 25 });
        let state = engine.run(&params);

        assert_eq!(state.segments.len(), 25);
        assert_eq!(state.total_lines, 25);
        assert_eq!(state.stop_reason, Some(StopReason::SafetyLimitReached));
    }

    #[test]
    fn count_at_ceiling_reports_policy_stop() {
        let params = count_params(25);
        let engine = BendEngine::with_config(&params, EngineConfig { max_segments: 25 });
        let state = engine.run(&params);

        assert_eq!(state.segments.len(), 25);
        assert_eq!(state.stop_reason, Some(StopReason::PolicyStopped));
    }

    #[test]
    fn run_selects_policies_from_its_own_params() {
        let stale = DrawingParameters {
            length_mode: LengthMode::Random,
            ..count_params(3)
        };
        let engine = BendEngine::new(&stale);

        let params = DrawingParameters {
            fixed_length: 7.0,
            ..count_params(3)
        };
        let state = engine.run(&params);
        assert!(state.segments.iter().all(|s| s.length == 7.0));
    }

    #[test]
    fn concurrent_runs_share_one_engine() {
        let params = count_params(64);
        let engine = BendEngine::new(&params);

        let states: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| engine.run(&params))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for state in &states {
            assert_eq!(state, &states[0]);
            assert_eq!(state.segments.len(), 64);
        }
    }

    #[test]
    fn update_policies_reselects() {
        let mut engine = BendEngine::new(&count_params(1));
        assert_eq!(engine.policies().length, LengthPolicy::Fixed);

        engine.update_policies(&DrawingParameters::default());
        assert_eq!(engine.policies().length, LengthPolicy::Random);
    }
}
