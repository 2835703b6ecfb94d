//! Output formatting for serene.
//!
//! Every command renders either colored text for people or JSON for scripts.

mod json;
mod pretty;

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::error::SereneError;
use crate::features::breathing::{BreathingPattern, PatternId};
use crate::features::stats::{Achievement, Achievements};
use crate::store::Settings;

pub use json::*;
pub use pretty::*;

/// A breathing pattern as listed to the user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSummary {
    pub id: PatternId,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(flatten)]
    pub timings: BreathingPattern,
    pub cycle_seconds: u32,
    pub breaths_per_minute: f64,
    pub selected: bool,
}

impl PatternSummary {
    /// Describe pattern `id`, resolving `custom` timings.
    #[must_use]
    pub fn new(id: PatternId, settings: &Settings) -> Self {
        let timings = id.resolve(&settings.custom_pattern);
        Self {
            id,
            name: id.display_name(),
            description: id.description(),
            timings,
            cycle_seconds: timings.cycle_seconds(),
            breaths_per_minute: timings.breaths_per_minute(),
            selected: settings.selected_pattern == id,
        }
    }

    /// Every pattern in catalogue order.
    #[must_use]
    pub fn all(settings: &Settings) -> Vec<Self> {
        PatternId::ALL
            .into_iter()
            .map(|id| Self::new(id, settings))
            .collect()
    }
}

/// An achievement and whether it has been earned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: Achievement,
    pub title: &'static str,
    pub description: &'static str,
    pub earned: bool,
}

impl AchievementStatus {
    /// The full achievement table against `earned`.
    #[must_use]
    pub fn all(earned: &Achievements) -> Vec<Self> {
        Achievement::ALL
            .into_iter()
            .map(|id| Self {
                id,
                title: id.title(),
                description: id.description(),
                earned: earned.contains(id),
            })
            .collect()
    }
}

/// Format the pattern catalogue.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn format_patterns(
    patterns: &[PatternSummary],
    format: OutputFormat,
) -> Result<String, SereneError> {
    match format {
        OutputFormat::Pretty => Ok(format_patterns_pretty(patterns)),
        OutputFormat::Json => format_patterns_json(patterns),
    }
}

/// Format a single pattern.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn format_pattern(pattern: &PatternSummary, format: OutputFormat) -> Result<String, SereneError> {
    match format {
        OutputFormat::Pretty => Ok(format_pattern_pretty(pattern)),
        OutputFormat::Json => to_json(pattern),
    }
}

/// Format user settings.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn format_settings(settings: &Settings, format: OutputFormat) -> Result<String, SereneError> {
    match format {
        OutputFormat::Pretty => Ok(format_settings_pretty(settings)),
        OutputFormat::Json => to_json(settings),
    }
}

/// Format the achievement table.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn format_achievements(
    achievements: &[AchievementStatus],
    format: OutputFormat,
) -> Result<String, SereneError> {
    match format {
        OutputFormat::Pretty => Ok(format_achievements_pretty(achievements)),
        OutputFormat::Json => format_achievements_json(achievements),
    }
}
