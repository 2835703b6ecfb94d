//! Practice features.
//!
//! - Meditation timer
//! - Breathing patterns and cycles
//! - Statistics, streaks and achievements
//! - Audio cues

pub mod audio;
pub mod breathing;
pub mod stats;
pub mod timer;
