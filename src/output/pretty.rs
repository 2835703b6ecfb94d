//! Human-readable output formatting.

use colored::Colorize;

use super::{AchievementStatus, PatternSummary};
use crate::store::Settings;

/// Format the pattern catalogue as a table.
#[must_use]
pub fn format_patterns_pretty(patterns: &[PatternSummary]) -> String {
    let mut output = format!("Breathing patterns ({})\n", patterns.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for pattern in patterns {
        let marker = if pattern.selected {
            "●".green()
        } else {
            "○".dimmed()
        };
        output.push_str(&format!(
            "{} {:<10} {:<9} {}\n",
            marker,
            pattern.id.as_str().bold(),
            pattern.timings.label().cyan(),
            pattern.description.dimmed()
        ));
    }

    output
}

/// Format one pattern with its phase timings.
#[must_use]
pub fn format_pattern_pretty(pattern: &PatternSummary) -> String {
    let mut output = format!("{} ({})\n", pattern.name.bold(), pattern.id);
    output.push_str(&format!("  {}\n", pattern.description.dimmed()));
    output.push_str(&format!("  {}:      {}s\n", "Inhale".dimmed(), pattern.timings.inhale()));
    output.push_str(&format!("  {}:        {}s\n", "Hold".dimmed(), pattern.timings.hold()));
    output.push_str(&format!("  {}:      {}s\n", "Exhale".dimmed(), pattern.timings.exhale()));
    output.push_str(&format!(
        "  {}:  {}s\n",
        "Hold after".dimmed(),
        pattern.timings.hold_after()
    ));
    output.push_str(&format!(
        "  {}:       {}s ({:.1} breaths/min)\n",
        "Cycle".dimmed(),
        pattern.cycle_seconds,
        pattern.breaths_per_minute
    ));
    if pattern.selected {
        output.push_str(&format!("  {}\n", "selected".green()));
    }
    output
}

/// Format user settings.
#[must_use]
pub fn format_settings_pretty(settings: &Settings) -> String {
    let goal = if settings.daily_goal_minutes == 0 {
        "off".dimmed().to_string()
    } else {
        format!("{} min", settings.daily_goal_minutes)
    };

    let mut output = "Settings\n".bold().to_string();
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!("  {}:       {}\n", "Theme".dimmed(), settings.theme));
    output.push_str(&format!(
        "  {}:       {}\n",
        "Sound".dimmed(),
        settings.background_sound.display_name()
    ));
    output.push_str(&format!(
        "  {}:      {:.0}%\n",
        "Volume".dimmed(),
        settings.volume() * 100.0
    ));
    output.push_str(&format!("  {}:  {}\n", "Daily goal".dimmed(), goal));
    output.push_str(&format!(
        "  {}:     {} ({})\n",
        "Pattern".dimmed(),
        settings.selected_pattern,
        settings.active_pattern().label()
    ));
    output.push_str(&format!(
        "  {}:      {}\n",
        "Custom".dimmed(),
        settings.custom_pattern.label()
    ));
    output
}

/// Format the achievement table with earned items first.
#[must_use]
pub fn format_achievements_pretty(achievements: &[AchievementStatus]) -> String {
    let earned = achievements.iter().filter(|a| a.earned).count();
    let mut output = format!("Achievements ({earned}/{})\n", achievements.len());
    output.push_str(&"─".repeat(50));
    output.push('\n');

    let (done, locked): (Vec<_>, Vec<_>) = achievements.iter().partition(|a| a.earned);
    for a in done {
        output.push_str(&format!(
            "{} {}  {}\n",
            "★".yellow(),
            a.title.bold(),
            a.description.dimmed()
        ));
    }
    for a in locked {
        output.push_str(&format!(
            "{} {}  {}\n",
            "☆".dimmed(),
            a.title.dimmed(),
            a.description.dimmed()
        ));
    }

    output
}
