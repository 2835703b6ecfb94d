//! Meditation session timer.
//!
//! A countdown that credits every elapsed second to the statistics exactly
//! once, whether the session completes or is paused or reset early.

pub mod countdown;
pub mod format;

pub use countdown::{SessionTimer, TickOutcome, TimerState, DEFAULT_DURATION_SECONDS};
pub use format::{
    format_duration, format_duration_mmss, format_seconds, parse_duration, render_progress_bar,
};
