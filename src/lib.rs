//! # bendscape
//!
//! Procedural "bend" line art. A turtle starts at a point and emits connected
//! segments whose length, turn and color come from configurable policies,
//! until a stopping policy ends the run.
//!
//! Build a [`BendEngine`] from a [`DrawingParameters`] record and call
//! [`BendEngine::run`] to get a finished [`GenerationState`], then hand it to
//! [`export::to_svg`] or [`export::to_json`]. Parameter records can be kept as
//! named presets through [`preset::PresetStore`].

pub mod drawing;
pub mod engine;
pub mod error;
pub mod export;
pub mod params;
pub mod policy;
pub mod preset;
pub mod stopping;
pub mod turtle;

pub use drawing::*;
pub use engine::*;
pub use error::BendError;
pub use params::*;
pub use policy::*;
pub use stopping::*;
pub use turtle::*;
