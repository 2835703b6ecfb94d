//! Configuration settings for serene.
//!
//! Settings are loaded from `~/.serene/config.yaml`. Every field is
//! optional; missing values fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::SereneError;
use crate::features::breathing::PatternId;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Meditation timer settings.
    pub timer: TimerConfig,
    /// Breathing practice settings.
    pub breathing: BreathingConfig,
    /// Saved state settings.
    pub storage: StorageConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Meditation timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Session length used when none is given.
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    /// Milliseconds between ticks. One tick is one second of practice.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

/// Breathing practice settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    /// Pattern selected on first run.
    #[serde(default = "default_pattern")]
    pub default_pattern: PatternId,
}

/// Saved state settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the state blob is stored under.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_duration_minutes() -> u32 {
    10
}

const fn default_tick_interval() -> u64 {
    1000
}

const fn default_pattern() -> PatternId {
    PatternId::Calm
}

fn default_namespace() -> String {
    "serene-storage".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            default_pattern: default_pattern(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
        }
    }
}

impl Config {
    /// Load configuration from the file described by `paths`.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load(paths: &Paths) -> Result<Self, SereneError> {
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SereneError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SereneError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            SereneError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Default timer length in seconds.
    #[must_use]
    pub const fn default_duration_seconds(&self) -> u32 {
        self.timer.default_duration_minutes.saturating_mul(60)
    }

    fn validate(&self) -> Result<(), SereneError> {
        if self.timer.default_duration_minutes == 0 {
            return Err(SereneError::Config(
                "timer.default_duration_minutes must be greater than zero".to_string(),
            ));
        }
        if self.storage.namespace.trim().is_empty() {
            return Err(SereneError::Config(
                "storage.namespace cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
