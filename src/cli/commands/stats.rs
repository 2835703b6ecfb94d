//! Statistics command implementation.
//!
//! Handles the stats subcommands for practice history.

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;

use super::Context;
use crate::cli::args::{OutputFormat, StatsCommands};
use crate::error::SereneError;
use crate::features::breathing::PatternId;
use crate::features::stats::{
    render_bar_chart, render_heatmap, render_sparkline, render_summary_box, render_week_chart,
    Achievement, DayPoint, StreakInfo,
};
use crate::features::timer::{format_seconds, render_progress_bar};
use crate::output::{format_achievements, to_json, AchievementStatus};
use crate::store::MeditationStore;

/// Headline numbers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsSummary {
    today_seconds: u64,
    total_seconds: u64,
    session_count: u32,
    breathing_sessions: u32,
    streak: StreakInfo,
    daily_goal_minutes: u32,
    daily_goal_progress: f64,
    achievements_earned: usize,
    week: Vec<DayPoint>,
}

impl StatsSummary {
    fn collect(store: &MeditationStore) -> Self {
        Self {
            today_seconds: store.today_duration_seconds(),
            total_seconds: store.total_duration_seconds(),
            session_count: store.timer().completed_cycles(),
            breathing_sessions: store.breathing_session_count(),
            streak: store.streak_info(),
            daily_goal_minutes: store.settings().daily_goal_minutes,
            daily_goal_progress: store.daily_goal_progress(),
            achievements_earned: store.achievements().len(),
            week: store.weekly_series(),
        }
    }
}

/// Execute stats subcommands.
///
/// # Errors
///
/// Returns `SereneError::Parse` if JSON serialization fails.
pub fn stats(ctx: &Context, cmd: Option<StatsCommands>) -> Result<String, SereneError> {
    let store = &ctx.store;
    match cmd {
        None | Some(StatsCommands::Summary) => render_summary(store, ctx.format),
        Some(StatsCommands::Week) => render_week(store, ctx.format),
        Some(StatsCommands::Heatmap) => render_heatmap_cmd(store, ctx.format),
        Some(StatsCommands::Achievements) => {
            format_achievements(&AchievementStatus::all(store.achievements()), ctx.format)
        }
        Some(StatsCommands::Patterns) => render_patterns(store, ctx.format),
    }
}

/// Render the headline summary.
fn render_summary(store: &MeditationStore, format: OutputFormat) -> Result<String, SereneError> {
    let summary = StatsSummary::collect(store);

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Pretty => {
            let mut output = Vec::new();

            let longest = format!("{} days", summary.streak.longest);
            output.push(render_summary_box(
                "Practice",
                &[
                    ("Today", format_seconds(summary.today_seconds)),
                    ("All time", format_seconds(summary.total_seconds)),
                    ("Sessions", summary.session_count.to_string()),
                    ("Breathing", summary.breathing_sessions.to_string()),
                    ("Streak", format!("{} days", summary.streak.current)),
                    ("Longest", longest),
                    (
                        "Achievements",
                        format!("{}/{}", summary.achievements_earned, Achievement::ALL.len()),
                    ),
                ],
            ));
            output.push(String::new());

            if summary.daily_goal_minutes > 0 {
                let goal = format!(
                    "Daily goal ({} min): {} {:.0}%",
                    summary.daily_goal_minutes,
                    render_progress_bar(summary.daily_goal_progress, 20),
                    summary.daily_goal_progress * 100.0
                );
                output.push(if summary.daily_goal_progress >= 1.0 {
                    goal.green().to_string()
                } else {
                    goal
                });
            }

            let minutes: Vec<u64> = summary
                .week
                .iter()
                .map(|p| p.meditation_seconds / 60)
                .collect();
            output.push(format!("Last 7 days: {}", render_sparkline(&minutes)));

            if let Some(days) = summary.streak.days_since_active.filter(|d| *d > 1) {
                output.push(
                    format!("Last practice was {days} days ago.")
                        .dimmed()
                        .to_string(),
                );
            }

            Ok(output.join("\n"))
        }
    }
}

/// Render the last seven days.
fn render_week(store: &MeditationStore, format: OutputFormat) -> Result<String, SereneError> {
    let week = store.weekly_series();

    match format {
        OutputFormat::Json => to_json(&week),
        OutputFormat::Pretty => {
            let total: u64 = week.iter().map(|p| p.meditation_seconds).sum();
            let breaths: u32 = week.iter().map(|p| p.breathing_sessions).sum();
            let active = week.iter().filter(|p| p.has_activity()).count();

            let mut output = Vec::new();
            output.push("📈 This week (minutes)".bold().to_string());
            output.push("─".repeat(40));
            output.push(render_week_chart(&week));
            output.push(String::new());
            output.push(format!(
                "Total: {}  Breathing: {}  Active days: {}/7",
                format_seconds(total),
                breaths,
                active
            ));

            Ok(output.join("\n"))
        }
    }
}

/// Render the twelve-week heatmap.
fn render_heatmap_cmd(store: &MeditationStore, format: OutputFormat) -> Result<String, SereneError> {
    let points = store.heatmap_series();

    match format {
        OutputFormat::Json => to_json(&points),
        OutputFormat::Pretty => {
            let active = points.iter().filter(|p| p.has_activity()).count();

            let mut output = Vec::new();
            output.push("🗓️ Practice heatmap (12 weeks)".bold().to_string());
            output.push("─".repeat(40));
            output.push(render_heatmap(&points));
            output.push(String::new());
            output.push(format!("Active days: {active}/{}", points.len()));

            Ok(output.join("\n"))
        }
    }
}

/// Render breathing sessions by pattern.
fn render_patterns(store: &MeditationStore, format: OutputFormat) -> Result<String, SereneError> {
    let usage: BTreeMap<PatternId, u32> = store.history().pattern_usage();

    match format {
        OutputFormat::Json => to_json(&usage),
        OutputFormat::Pretty => {
            if usage.is_empty() {
                return Ok("No breathing sessions yet. Try 'serene breathe'.".to_string());
            }

            let data: Vec<(String, u64)> = usage
                .iter()
                .map(|(id, count)| (id.as_str().to_string(), u64::from(*count)))
                .collect();

            let mut output = Vec::new();
            output.push("🌬️ Breathing sessions by pattern".bold().to_string());
            output.push("─".repeat(40));
            output.push(render_bar_chart(&data, 8, 30));

            Ok(output.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::audio::Silent;
    use chrono::NaiveDate;

    fn practiced_store() -> MeditationStore {
        let date = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let mut store = MeditationStore::new(Box::new(FixedClock::new(date)), Box::new(Silent));
        store.start_timer(300).unwrap();
        for _ in 0..300 {
            store.tick_timer();
        }
        store.select_pattern(PatternId::Box);
        store.start_breathing();
        while store.breathing().is_running() {
            store.tick_breathing();
        }
        store
    }

    #[test]
    fn test_summary_json() {
        let json = render_summary(&practiced_store(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["todaySeconds"], 300);
        assert_eq!(parsed["sessionCount"], 1);
        assert_eq!(parsed["breathingSessions"], 1);
        assert_eq!(parsed["streak"]["current"], 1);
        assert_eq!(parsed["week"].as_array().unwrap().len(), 7);
        assert_eq!(parsed["week"][6]["meditationSeconds"], 300);
    }

    #[test]
    fn test_summary_pretty() {
        colored::control::set_override(false);
        let output = render_summary(&practiced_store(), OutputFormat::Pretty).unwrap();

        assert!(output.contains("Practice"));
        assert!(output.contains("5 minutes"));
        assert!(output.contains("Daily goal (10 min)"));
        assert!(output.contains("50%"));
    }

    #[test]
    fn test_week_pretty_counts_active_days() {
        colored::control::set_override(false);
        let output = render_week(&practiced_store(), OutputFormat::Pretty).unwrap();
        assert!(output.contains("Active days: 1/7"));
    }

    #[test]
    fn test_heatmap_json_length() {
        let json = render_heatmap_cmd(&practiced_store(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 84);
    }

    #[test]
    fn test_patterns_usage() {
        let json = render_patterns(&practiced_store(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["box"], 1);

        let date = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();
        let empty = MeditationStore::new(Box::new(FixedClock::new(date)), Box::new(Silent));
        let output = render_patterns(&empty, OutputFormat::Pretty).unwrap();
        assert!(output.contains("No breathing sessions yet"));
    }
}
