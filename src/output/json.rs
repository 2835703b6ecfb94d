//! JSON output formatting for serene.

use serde::Serialize;
use serde_json::json;

use super::{AchievementStatus, PatternSummary};
use crate::error::SereneError;

/// Format the pattern catalogue as JSON.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn format_patterns_json(patterns: &[PatternSummary]) -> Result<String, SereneError> {
    let selected = patterns.iter().find(|p| p.selected).map(|p| p.id);
    let output = json!({
        "selected": selected,
        "count": patterns.len(),
        "items": patterns
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the achievement table as JSON.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn format_achievements_json(achievements: &[AchievementStatus]) -> Result<String, SereneError> {
    let earned = achievements.iter().filter(|a| a.earned).count();
    let output = json!({
        "earned": earned,
        "count": achievements.len(),
        "items": achievements
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format any serializable value as JSON.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SereneError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::PatternId;
    use crate::features::stats::{Achievement, Achievements};
    use crate::store::Settings;

    #[test]
    fn test_format_patterns_json() {
        let settings = Settings::default();
        let patterns = PatternSummary::all(&settings);
        let json = format_patterns_json(&patterns).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["count"], 6);
        assert_eq!(parsed["selected"], "calm");
        assert_eq!(parsed["items"][0]["id"], "box");
        assert_eq!(parsed["items"][0]["holdAfter"], 4);
        assert_eq!(parsed["items"][0]["cycleSeconds"], 16);
    }

    #[test]
    fn test_format_achievements_json() {
        let mut earned = Achievements::default();
        earned.insert(Achievement::FirstBreath);
        let json = format_achievements_json(&AchievementStatus::all(&earned)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["earned"], 1);
        assert_eq!(parsed["count"], Achievement::ALL.len());
        assert_eq!(parsed["items"][1]["id"], "firstBreath");
        assert_eq!(parsed["items"][1]["earned"], true);
    }

    #[test]
    fn test_to_json_settings() {
        let json = to_json(&Settings::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["theme"], "system");
        assert_eq!(parsed["selectedPattern"], PatternId::Calm.as_str());
        assert_eq!(parsed["dailyGoalMinutes"], 10);
    }
}
