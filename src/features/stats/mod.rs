//! Practice statistics.
//!
//! The per-day history is the source of truth. Streaks, charts and
//! achievements are all derived from it:
//! - Daily records of meditation time and breathing sessions
//! - Current and longest streaks
//! - Weekly and heatmap series
//! - Achievements
//! - Terminal charts

pub mod achievements;
pub mod history;
pub mod series;
pub mod streak;
pub mod visualization;

pub use achievements::{evaluate_achievements, Achievement, Achievements, StatsSnapshot};
pub use history::{DailyHistory, DailyRecord};
pub use series::{daily_series, heatmap_series, weekly_series, DayPoint, HEATMAP_DAYS, WEEK_DAYS};
pub use streak::{compute_streak, longest_streak, StreakInfo};
pub use visualization::{
    render_bar_chart, render_heatmap, render_sparkline, render_summary_box, render_week_chart,
};
