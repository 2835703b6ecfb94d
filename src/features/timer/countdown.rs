//! Countdown timer with partial credit.

use serde::{Deserialize, Serialize};

use crate::error::SereneError;

/// Default session length (10 minutes).
pub const DEFAULT_DURATION_SECONDS: u32 = 600;

/// Timer state.
///
/// Running and paused are separate variants, so a timer can never be both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not started, or reset
    Idle,
    /// Counting down
    Running,
    /// Stopped mid-session, can be resumed
    Paused,
    /// Reached zero
    Completed,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
            Self::Paused => write!(f, "Paused"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Inactive,
    /// One second elapsed and the timer is still running.
    Running,
    /// The timer just reached zero. `credited` seconds have not yet been
    /// counted towards statistics.
    Completed { credited: u32 },
}

/// A meditation countdown.
///
/// The timer does not touch statistics itself. Operations that end or
/// interrupt a run return the number of seconds that must be credited, and
/// the caller folds them into the daily history. A watermark of already
/// credited seconds keeps pause-then-reset or pause-then-complete from
/// counting the same second twice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTimer {
    duration_seconds: u32,
    remaining_seconds: u32,
    state: TimerState,
    completed_cycles: u32,
    #[serde(skip)]
    credited_seconds: u32,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::idle(DEFAULT_DURATION_SECONDS)
    }
}

impl SessionTimer {
    /// Create an idle timer configured for `duration_seconds`.
    ///
    /// # Errors
    ///
    /// Returns `SereneError::InvalidInput` if the duration is zero.
    pub fn with_duration(duration_seconds: u32) -> Result<Self, SereneError> {
        validate_duration(duration_seconds)?;
        Ok(Self::idle(duration_seconds))
    }

    const fn idle(duration_seconds: u32) -> Self {
        Self {
            duration_seconds,
            remaining_seconds: duration_seconds,
            state: TimerState::Idle,
            completed_cycles: 0,
            credited_seconds: 0,
        }
    }

    /// Restore the completed session count, e.g. after loading saved state.
    #[must_use]
    pub const fn with_completed_cycles(mut self, completed_cycles: u32) -> Self {
        self.completed_cycles = completed_cycles;
        self
    }

    /// Start a new run of `duration_seconds`.
    ///
    /// If a previous run was still running or paused, its uncredited elapsed
    /// time is returned so it is not lost.
    ///
    /// # Errors
    ///
    /// Returns `SereneError::InvalidInput` if the duration is zero.
    pub fn start(&mut self, duration_seconds: u32) -> Result<u32, SereneError> {
        validate_duration(duration_seconds)?;

        let carried = if self.is_active() { self.take_credit() } else { 0 };

        self.duration_seconds = duration_seconds;
        self.remaining_seconds = duration_seconds;
        self.credited_seconds = 0;
        self.state = TimerState::Running;
        Ok(carried)
    }

    /// Advance the timer by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Inactive;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);

        if self.remaining_seconds == 0 {
            self.state = TimerState::Completed;
            self.completed_cycles += 1;
            TickOutcome::Completed {
                credited: self.take_credit(),
            }
        } else {
            TickOutcome::Running
        }
    }

    /// Pause a running timer, returning the seconds to credit.
    pub fn pause(&mut self) -> u32 {
        if self.state != TimerState::Running {
            return 0;
        }
        self.state = TimerState::Paused;
        self.take_credit()
    }

    /// Resume a paused timer. Returns false if it was not paused.
    pub fn resume(&mut self) -> bool {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
            true
        } else {
            false
        }
    }

    /// Return to the full duration, returning the seconds to credit.
    ///
    /// The completed session count is left untouched.
    pub fn reset(&mut self) -> u32 {
        let credited = if self.is_active() { self.take_credit() } else { 0 };

        self.remaining_seconds = self.duration_seconds;
        self.credited_seconds = 0;
        self.state = TimerState::Idle;
        credited
    }

    fn take_credit(&mut self) -> u32 {
        let elapsed = self.elapsed_seconds();
        let credit = elapsed.saturating_sub(self.credited_seconds);
        self.credited_seconds = elapsed;
        credit
    }

    /// Configured session length.
    #[must_use]
    pub const fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// Seconds left in the current run.
    #[must_use]
    pub const fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Seconds elapsed in the current run.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u32 {
        self.duration_seconds - self.remaining_seconds
    }

    /// Number of runs that reached zero.
    #[must_use]
    pub const fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Check if the timer is counting down.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Check if the timer is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    /// Running or paused.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    /// Get progress as a fraction (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_seconds == 0 {
            return 1.0;
        }
        f64::from(self.elapsed_seconds()) / f64::from(self.duration_seconds)
    }
}

fn validate_duration(duration_seconds: u32) -> Result<(), SereneError> {
    if duration_seconds == 0 {
        return Err(SereneError::InvalidInput(
            "session duration must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
