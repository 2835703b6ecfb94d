//! Breathing cycle state machine.
//!
//! ```text
//! Inhale -> Hold -> Exhale -> HoldAfter -> Inhale (next cycle) | done
//! ```
//!
//! Hold phases with a zero duration are skipped. After the last cycle the
//! machine reports completion and returns to its initial state.

use serde::{Deserialize, Serialize};

use super::pattern::{BreathingPattern, PatternId};

/// Cycles in one breathing session.
pub const CYCLES_PER_SESSION: u32 = 5;

/// A phase of the breath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Breathing in
    Inhale,
    /// Holding after the inhale
    Hold,
    /// Breathing out
    Exhale,
    /// Holding after the exhale
    HoldAfter,
}

impl Phase {
    /// Prompt shown to the user during this phase.
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::Inhale => "Breathe in",
            Self::Hold | Self::HoldAfter => "Hold",
            Self::Exhale => "Breathe out",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inhale => write!(f, "Inhale"),
            Self::Hold => write!(f, "Hold"),
            Self::Exhale => write!(f, "Exhale"),
            Self::HoldAfter => write!(f, "Hold (empty)"),
        }
    }
}

impl BreathingPattern {
    /// Duration of `phase` under this pattern.
    #[must_use]
    pub const fn duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Inhale => self.inhale(),
            Phase::Hold => self.hold(),
            Phase::Exhale => self.exhale(),
            Phase::HoldAfter => self.hold_after(),
        }
    }
}

/// Whether a breathing session is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathingState {
    /// No session
    Idle,
    /// Ticking
    Running,
    /// Session in progress but not ticking
    Paused,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreathEvent {
    /// Not running; nothing changed.
    Idle,
    /// Still within the current phase.
    Continue,
    /// Moved to a new phase. Starting a new cycle is reported as a change to
    /// `Inhale` with the new `cycle_index`.
    PhaseChanged {
        /// Phase just finished
        from: Phase,
        /// Phase now active
        to: Phase,
        /// 1-based cycle number
        cycle_index: u32,
    },
    /// The final cycle finished. The machine is back in its initial state.
    SessionCompleted {
        /// Pattern in use when the session ended
        pattern_id: PatternId,
    },
}

/// Breathing session progress.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingCycle {
    pattern_id: PatternId,
    pattern: BreathingPattern,
    #[serde(skip)]
    pending: Option<(PatternId, BreathingPattern)>,
    phase: Phase,
    phase_elapsed: u32,
    cycle_index: u32,
    state: BreathingState,
}

impl BreathingCycle {
    /// Create an idle cycle using the given pattern.
    #[must_use]
    pub const fn new(pattern_id: PatternId, pattern: BreathingPattern) -> Self {
        Self {
            pattern_id,
            pattern,
            pending: None,
            phase: Phase::Inhale,
            phase_elapsed: 0,
            cycle_index: 1,
            state: BreathingState::Idle,
        }
    }

    /// Begin a session from the first inhale.
    pub fn start(&mut self, pattern_id: PatternId, pattern: BreathingPattern) {
        *self = Self::new(pattern_id, pattern);
        self.state = BreathingState::Running;
    }

    /// Switch patterns.
    ///
    /// While a session is in progress the current phase keeps its timing and
    /// the new pattern applies from the next phase transition. When idle the
    /// switch is immediate.
    pub fn set_pattern(&mut self, pattern_id: PatternId, pattern: BreathingPattern) {
        if self.state == BreathingState::Idle {
            self.pattern_id = pattern_id;
            self.pattern = pattern;
            self.pending = None;
        } else {
            self.pending = Some((pattern_id, pattern));
        }
    }

    /// Pause a running session.
    pub fn pause(&mut self) -> bool {
        if self.state == BreathingState::Running {
            self.state = BreathingState::Paused;
            true
        } else {
            false
        }
    }

    /// Resume a paused session.
    pub fn resume(&mut self) -> bool {
        if self.state == BreathingState::Paused {
            self.state = BreathingState::Running;
            true
        } else {
            false
        }
    }

    /// Abandon the session without recording it.
    ///
    /// Returns true if a session was in progress.
    pub fn stop(&mut self) -> bool {
        let was_active = self.state != BreathingState::Idle;
        self.return_to_start();
        was_active
    }

    /// Advance one second.
    pub fn tick(&mut self) -> BreathEvent {
        if self.state != BreathingState::Running {
            return BreathEvent::Idle;
        }

        self.phase_elapsed += 1;
        if self.phase_elapsed < self.pattern.duration(self.phase) {
            return BreathEvent::Continue;
        }

        self.advance()
    }

    fn advance(&mut self) -> BreathEvent {
        let breathed = self.pattern_id;
        if let Some((id, pattern)) = self.pending.take() {
            self.pattern_id = id;
            self.pattern = pattern;
        }
        self.phase_elapsed = 0;

        let from = self.phase;
        let next = match from {
            Phase::Inhale if self.pattern.hold() > 0 => Some(Phase::Hold),
            Phase::Inhale | Phase::Hold => Some(Phase::Exhale),
            Phase::Exhale if self.pattern.hold_after() > 0 => Some(Phase::HoldAfter),
            Phase::Exhale | Phase::HoldAfter => None,
        };

        if let Some(to) = next {
            self.phase = to;
            tracing::trace!(%from, %to, cycle = self.cycle_index, "breathing phase change");
            return BreathEvent::PhaseChanged {
                from,
                to,
                cycle_index: self.cycle_index,
            };
        }

        if self.cycle_index >= CYCLES_PER_SESSION {
            self.return_to_start();
            tracing::debug!(pattern_id = %breathed, "breathing session complete");
            return BreathEvent::SessionCompleted {
                pattern_id: breathed,
            };
        }

        self.cycle_index += 1;
        self.phase = Phase::Inhale;
        BreathEvent::PhaseChanged {
            from,
            to: Phase::Inhale,
            cycle_index: self.cycle_index,
        }
    }

    fn return_to_start(&mut self) {
        if let Some((id, pattern)) = self.pending.take() {
            self.pattern_id = id;
            self.pattern = pattern;
        }
        self.phase = Phase::Inhale;
        self.phase_elapsed = 0;
        self.cycle_index = 1;
        self.state = BreathingState::Idle;
    }

    /// Pattern driving the current phase.
    #[must_use]
    pub const fn pattern_id(&self) -> PatternId {
        self.pattern_id
    }

    /// Timings driving the current phase.
    #[must_use]
    pub const fn pattern(&self) -> &BreathingPattern {
        &self.pattern
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds spent in the current phase.
    #[must_use]
    pub const fn phase_elapsed(&self) -> u32 {
        self.phase_elapsed
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub const fn phase_remaining(&self) -> u32 {
        self.pattern.duration(self.phase) - self.phase_elapsed
    }

    /// 1-based cycle number.
    #[must_use]
    pub const fn cycle_index(&self) -> u32 {
        self.cycle_index
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BreathingState {
        self.state
    }

    /// Check if the session is ticking.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == BreathingState::Running
    }
}
