//! Streak calculation.
//!
//! Streaks are always recomputed from the daily history rather than stored
//! and incremented, so they cannot drift from the records.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::history::DailyHistory;

/// Count consecutive practice days ending today.
///
/// If today has no practice yet the count starts from yesterday, so a streak
/// survives until the day is over. Any other gap ends it.
#[must_use]
pub fn compute_streak(history: &DailyHistory, today: NaiveDate) -> u32 {
    let mut check_date = if history.has_activity(today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    while history.has_activity(check_date) {
        streak += 1;
        check_date -= Duration::days(1);
    }
    streak
}

/// Longest run of consecutive practice days ever recorded.
#[must_use]
pub fn longest_streak(history: &DailyHistory) -> u32 {
    let mut longest = 0;
    let mut streak = 0;
    let mut prev_date: Option<NaiveDate> = None;

    for date in history.active_dates() {
        streak = match prev_date {
            Some(prev) if (date - prev).num_days() == 1 => streak + 1,
            _ => 1,
        };
        longest = longest.max(streak);
        prev_date = Some(date);
    }

    longest
}

/// Streak summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakInfo {
    /// Current streak
    pub current: u32,
    /// Longest streak ever
    pub longest: u32,
    /// Most recent day with practice
    pub last_active: Option<NaiveDate>,
    /// Days since the most recent practice
    pub days_since_active: Option<i64>,
}

impl StreakInfo {
    /// Calculate streak info as of `today`.
    #[must_use]
    pub fn calculate(history: &DailyHistory, today: NaiveDate) -> Self {
        let last_active = history.active_dates().filter(|d| *d <= today).last();

        Self {
            current: compute_streak(history, today),
            longest: longest_streak(history),
            last_active,
            days_since_active: last_active.map(|d| (today - d).num_days()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::PatternId;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn history_with(days: &[u32]) -> DailyHistory {
        let mut history = DailyHistory::new();
        for d in days {
            history.record_meditation(day(*d), 60);
        }
        history
    }

    #[test]
    fn test_streak_empty() {
        assert_eq!(compute_streak(&DailyHistory::new(), day(10)), 0);
        assert_eq!(longest_streak(&DailyHistory::new()), 0);

        let info = StreakInfo::calculate(&DailyHistory::new(), day(10));
        assert!(info.last_active.is_none());
        assert!(info.days_since_active.is_none());
    }

    #[test]
    fn test_streak_today_and_yesterday() {
        let history = history_with(&[8, 9, 10]);
        assert_eq!(compute_streak(&history, day(10)), 3);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        // Activity on D and D-1 but not D-2
        let history = history_with(&[5, 9, 10]);
        assert_eq!(compute_streak(&history, day(10)), 2);
    }

    #[test]
    fn test_streak_survives_until_today_ends() {
        let history = history_with(&[7, 8, 9]);
        assert_eq!(compute_streak(&history, day(10)), 3);
    }

    #[test]
    fn test_streak_broken_by_two_day_gap() {
        let history = history_with(&[7, 8]);
        assert_eq!(compute_streak(&history, day(10)), 0);
    }

    #[test]
    fn test_breathing_counts_as_activity() {
        let mut history = history_with(&[9]);
        history.record_breathing(day(10), PatternId::Box);
        assert_eq!(compute_streak(&history, day(10)), 2);
    }

    #[test]
    fn test_longest_streak() {
        let history = history_with(&[1, 2, 3, 4, 8, 9, 12]);
        assert_eq!(longest_streak(&history), 4);

        let info = StreakInfo::calculate(&history, day(13));
        assert_eq!(info.current, 1);
        assert_eq!(info.longest, 4);
        assert_eq!(info.last_active, Some(day(12)));
        assert_eq!(info.days_since_active, Some(1));
    }
}
