//! Guided breathing practice.
//!
//! A breathing session runs a fixed number of inhale / hold / exhale /
//! hold-after cycles driven by a [`BreathingPattern`].

pub mod cycle;
pub mod pattern;

pub use cycle::{BreathEvent, BreathingCycle, BreathingState, Phase, CYCLES_PER_SESSION};
pub use pattern::{BreathingPattern, PatternId, MAX_PHASE_SECONDS};
