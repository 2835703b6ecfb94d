//! Breathing patterns.
//!
//! A pattern is four phase lengths in whole seconds. Inhale and exhale must
//! last at least one second; a hold of zero means the phase is skipped.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SereneError;

/// Longest allowed phase, in seconds.
pub const MAX_PHASE_SECONDS: u32 = 60;

/// Identifies a built-in pattern or the user's custom one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternId {
    /// Box breathing, 4-4-4-4
    Box,
    /// 4-7-8 relaxing breath
    Relax,
    /// Calming 4-2-6
    Calm,
    /// Coherent breathing, 5-5
    Coherent,
    /// Energizing 6-2
    Energize,
    /// User-defined pattern
    Custom,
}

impl PatternId {
    /// All pattern ids in display order.
    pub const ALL: [Self; 6] = [
        Self::Box,
        Self::Relax,
        Self::Calm,
        Self::Coherent,
        Self::Energize,
        Self::Custom,
    ];

    /// Stable identifier used in storage and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Relax => "relax",
            Self::Calm => "calm",
            Self::Coherent => "coherent",
            Self::Energize => "energize",
            Self::Custom => "custom",
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Box => "Box Breathing",
            Self::Relax => "4-7-8 Relaxing Breath",
            Self::Calm => "Calm",
            Self::Coherent => "Coherent Breathing",
            Self::Energize => "Energize",
            Self::Custom => "Custom",
        }
    }

    /// One-line description of what the pattern is for.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Box => "Equal counts on every side. Steadies attention.",
            Self::Relax => "Long hold and slow exhale. Helps with sleep.",
            Self::Calm => "Exhale longer than the inhale to slow down.",
            Self::Coherent => "Even breaths at about six per minute.",
            Self::Energize => "Quick exhale for a gentle lift.",
            Self::Custom => "Your own timings.",
        }
    }

    /// Built-in timings, or `None` for the custom pattern.
    #[must_use]
    pub const fn builtin(&self) -> Option<BreathingPattern> {
        match self {
            Self::Box => Some(BreathingPattern::fixed(4, 4, 4, 4)),
            Self::Relax => Some(BreathingPattern::fixed(4, 7, 8, 0)),
            Self::Calm => Some(BreathingPattern::fixed(4, 2, 6, 0)),
            Self::Coherent => Some(BreathingPattern::fixed(5, 0, 5, 0)),
            Self::Energize => Some(BreathingPattern::fixed(6, 0, 2, 0)),
            Self::Custom => None,
        }
    }

    /// Timings for this id, using `custom` for the custom pattern.
    #[must_use]
    pub fn resolve(&self, custom: &BreathingPattern) -> BreathingPattern {
        self.builtin().unwrap_or(*custom)
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternId {
    type Err = SereneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "box" | "square" => Ok(Self::Box),
            "relax" | "4-7-8" | "478" => Ok(Self::Relax),
            "calm" => Ok(Self::Calm),
            "coherent" | "resonant" => Ok(Self::Coherent),
            "energize" | "energise" => Ok(Self::Energize),
            "custom" => Ok(Self::Custom),
            other => Err(SereneError::NotFound(format!("breathing pattern '{other}'"))),
        }
    }
}

/// Phase lengths of a breathing pattern, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPattern")]
pub struct BreathingPattern {
    inhale: u32,
    hold: u32,
    exhale: u32,
    hold_after: u32,
}

/// Unvalidated pattern as it appears in saved state.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPattern {
    inhale: u32,
    #[serde(default)]
    hold: u32,
    exhale: u32,
    #[serde(default)]
    hold_after: u32,
}

impl TryFrom<RawPattern> for BreathingPattern {
    type Error = SereneError;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        Self::new(raw.inhale, raw.hold, raw.exhale, raw.hold_after)
    }
}

impl Default for BreathingPattern {
    fn default() -> Self {
        Self::fixed(4, 4, 4, 0)
    }
}

impl BreathingPattern {
    /// Define a pattern.
    ///
    /// # Errors
    ///
    /// Returns `SereneError::InvalidInput` if inhale or exhale is zero, or any
    /// phase is longer than [`MAX_PHASE_SECONDS`].
    pub fn new(inhale: u32, hold: u32, exhale: u32, hold_after: u32) -> Result<Self, SereneError> {
        if inhale == 0 || exhale == 0 {
            return Err(SereneError::InvalidInput(
                "inhale and exhale must each last at least one second".to_string(),
            ));
        }
        if [inhale, hold, exhale, hold_after]
            .iter()
            .any(|&secs| secs > MAX_PHASE_SECONDS)
        {
            return Err(SereneError::InvalidInput(format!(
                "breathing phases cannot exceed {MAX_PHASE_SECONDS} seconds"
            )));
        }
        Ok(Self::fixed(inhale, hold, exhale, hold_after))
    }

    const fn fixed(inhale: u32, hold: u32, exhale: u32, hold_after: u32) -> Self {
        Self {
            inhale,
            hold,
            exhale,
            hold_after,
        }
    }

    /// Inhale length.
    #[must_use]
    pub const fn inhale(&self) -> u32 {
        self.inhale
    }

    /// Hold after inhaling.
    #[must_use]
    pub const fn hold(&self) -> u32 {
        self.hold
    }

    /// Exhale length.
    #[must_use]
    pub const fn exhale(&self) -> u32 {
        self.exhale
    }

    /// Hold after exhaling.
    #[must_use]
    pub const fn hold_after(&self) -> u32 {
        self.hold_after
    }

    /// Length of one full cycle.
    #[must_use]
    pub const fn cycle_seconds(&self) -> u32 {
        self.inhale + self.hold + self.exhale + self.hold_after
    }

    /// Breaths per minute at this pattern's pace.
    #[must_use]
    pub fn breaths_per_minute(&self) -> f64 {
        60.0 / f64::from(self.cycle_seconds())
    }

    /// Compact "4-7-8" style label, omitting a zero hold-after.
    #[must_use]
    pub fn label(&self) -> String {
        if self.hold_after > 0 {
            format!("{}-{}-{}-{}", self.inhale, self.hold, self.exhale, self.hold_after)
        } else {
            format!("{}-{}-{}", self.inhale, self.hold, self.exhale)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_patterns_are_valid() {
        for id in PatternId::ALL {
            if let Some(p) = id.builtin() {
                assert!(
                    BreathingPattern::new(p.inhale(), p.hold(), p.exhale(), p.hold_after()).is_ok(),
                    "{id} should be a valid pattern"
                );
            }
        }
        assert!(PatternId::Custom.builtin().is_none());
    }

    #[test]
    fn test_pattern_rejects_zero_inhale_or_exhale() {
        assert!(BreathingPattern::new(0, 4, 4, 0).is_err());
        assert!(BreathingPattern::new(4, 4, 0, 0).is_err());
        assert!(BreathingPattern::new(4, 0, 4, 0).is_ok());
    }

    #[test]
    fn test_pattern_rejects_long_phase() {
        assert!(BreathingPattern::new(4, 61, 4, 0).is_err());
        assert!(BreathingPattern::new(60, 60, 60, 60).is_ok());
    }

    #[test]
    fn test_parse_pattern_id() {
        assert_eq!("box".parse::<PatternId>().unwrap(), PatternId::Box);
        assert_eq!("4-7-8".parse::<PatternId>().unwrap(), PatternId::Relax);
        assert_eq!(" Calm ".parse::<PatternId>().unwrap(), PatternId::Calm);
        assert!(matches!(
            "triangle".parse::<PatternId>(),
            Err(SereneError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_custom() {
        let custom = BreathingPattern::new(3, 1, 5, 2).unwrap();
        assert_eq!(PatternId::Custom.resolve(&custom), custom);
        assert_eq!(
            PatternId::Box.resolve(&custom),
            BreathingPattern::new(4, 4, 4, 4).unwrap()
        );
    }

    #[test]
    fn test_cycle_math() {
        let p = PatternId::Coherent.resolve(&BreathingPattern::default());
        assert_eq!(p.cycle_seconds(), 10);
        assert!((p.breaths_per_minute() - 6.0).abs() < f64::EPSILON);
        assert_eq!(p.label(), "5-0-5");
        assert_eq!(PatternId::Box.resolve(&p).label(), "4-4-4-4");
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: BreathingPattern =
            serde_json::from_str(r#"{"inhale":4,"hold":2,"exhale":6}"#).unwrap();
        assert_eq!(ok.hold_after(), 0);

        let bad = serde_json::from_str::<BreathingPattern>(r#"{"inhale":0,"exhale":6}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_pattern_id_serde() {
        assert_eq!(serde_json::to_string(&PatternId::Relax).unwrap(), r#""relax""#);
        let id: PatternId = serde_json::from_str(r#""coherent""#).unwrap();
        assert_eq!(id, PatternId::Coherent);
    }
}
