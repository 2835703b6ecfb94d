//! User preferences kept alongside practice state.

use serde::{Deserialize, Serialize};

use crate::error::SereneError;
use crate::features::audio::BackgroundSound;
use crate::features::breathing::{BreathingPattern, PatternId};

/// Default background volume.
pub const DEFAULT_VOLUME: f32 = 0.5;

/// Default daily goal in minutes.
pub const DEFAULT_DAILY_GOAL_MINUTES: u32 = 10;

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow the system
    #[default]
    System,
}

impl Theme {
    /// Parse from a user-supplied name.
    ///
    /// # Errors
    ///
    /// Returns `SereneError::NotFound` for unknown names.
    pub fn parse(s: &str) -> Result<Self, SereneError> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" | "auto" => Ok(Self::System),
            other => Err(SereneError::NotFound(format!("theme '{other}'"))),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
            Self::System => write!(f, "system"),
        }
    }
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Color theme
    pub theme: Theme,
    /// Ambient sound
    pub background_sound: BackgroundSound,
    /// Ambient volume, 0.0 - 1.0
    volume: f32,
    /// Daily meditation goal in minutes; zero disables it
    pub daily_goal_minutes: u32,
    /// Pattern used for the next breathing session
    pub selected_pattern: PatternId,
    /// Timings of the custom pattern
    pub custom_pattern: BreathingPattern,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            background_sound: BackgroundSound::default(),
            volume: DEFAULT_VOLUME,
            daily_goal_minutes: DEFAULT_DAILY_GOAL_MINUTES,
            selected_pattern: PatternId::Calm,
            custom_pattern: BreathingPattern::default(),
        }
    }
}

impl Settings {
    /// Ambient volume.
    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    /// Set the ambient volume, clamped to 0.0 - 1.0. NaN resets to the
    /// default.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = if volume.is_nan() {
            DEFAULT_VOLUME
        } else {
            volume.clamp(0.0, 1.0)
        };
    }

    /// Timings of the selected pattern.
    #[must_use]
    pub fn active_pattern(&self) -> BreathingPattern {
        self.selected_pattern.resolve(&self.custom_pattern)
    }

    /// Daily goal in seconds.
    #[must_use]
    pub const fn daily_goal_seconds(&self) -> u64 {
        self.daily_goal_minutes as u64 * 60
    }
}
