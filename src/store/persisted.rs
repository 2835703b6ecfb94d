//! The saved state blob.
//!
//! Everything worth keeping between runs is written as one JSON object under
//! a single storage key. Every field has a default, so older or partial
//! blobs still load. Running timers and breathing sessions are not saved.

use serde::{Deserialize, Serialize};

use super::settings::{Theme, DEFAULT_DAILY_GOAL_MINUTES, DEFAULT_VOLUME};
use crate::features::audio::BackgroundSound;
use crate::features::breathing::{BreathingPattern, PatternId};
use crate::features::stats::{Achievements, DailyHistory};
use crate::features::timer::DEFAULT_DURATION_SECONDS;

/// Version written by this build.
pub const STATE_VERSION: u32 = 1;

/// Serialized practice state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    /// Layout version
    pub version: u32,
    /// Color theme
    pub theme: Theme,
    /// Meditation seconds today, as of the last save
    pub today_duration: u64,
    /// All-time meditation seconds
    pub total_duration: u64,
    /// Timer sessions run to completion
    pub session_count: u32,
    /// All-time completed breathing sessions
    pub breathing_sessions: u32,
    /// Last configured timer length in seconds
    pub timer_duration: u32,
    /// Pattern for the next breathing session
    pub selected_pattern: PatternId,
    /// Timings of the custom pattern
    pub custom_pattern: BreathingPattern,
    /// Ambient sound
    pub background_sound: BackgroundSound,
    /// Ambient volume
    pub volume: f32,
    /// Streak as of the last save; recomputed on load
    pub streak: u32,
    /// Per-day records
    pub daily_history: DailyHistory,
    /// Daily goal in minutes
    pub daily_goal: u32,
    /// Earned achievements
    pub achievements: Achievements,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            theme: Theme::default(),
            today_duration: 0,
            total_duration: 0,
            session_count: 0,
            breathing_sessions: 0,
            timer_duration: DEFAULT_DURATION_SECONDS,
            selected_pattern: PatternId::Calm,
            custom_pattern: BreathingPattern::default(),
            background_sound: BackgroundSound::default(),
            volume: DEFAULT_VOLUME,
            streak: 0,
            daily_history: DailyHistory::default(),
            daily_goal: DEFAULT_DAILY_GOAL_MINUTES,
            achievements: Achievements::default(),
        }
    }
}

impl PersistedState {
    /// Parse a saved blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the blob is not valid JSON or a field is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to a blob.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
