//! Fixed-length per-day series for charts.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::history::DailyHistory;

/// Days in the weekly series.
pub const WEEK_DAYS: usize = 7;

/// Days in the heatmap series (twelve weeks).
pub const HEATMAP_DAYS: usize = 84;

/// Aggregates for one day of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPoint {
    /// Calendar date
    pub date: NaiveDate,
    /// Meditation seconds
    pub meditation_seconds: u64,
    /// Completed breathing sessions
    pub breathing_sessions: u32,
}

impl DayPoint {
    /// Check if anything was practiced.
    #[must_use]
    pub const fn has_activity(&self) -> bool {
        self.meditation_seconds > 0 || self.breathing_sessions > 0
    }

    /// Minutes of meditation plus one per breathing session, used for
    /// chart intensity.
    #[must_use]
    pub const fn activity_score(&self) -> u64 {
        self.meditation_seconds / 60 + self.breathing_sessions as u64
    }
}

/// The `days` days ending at `today`, oldest first. Days without a record
/// are filled with zeros.
#[must_use]
pub fn daily_series(history: &DailyHistory, today: NaiveDate, days: usize) -> Vec<DayPoint> {
    (0..days)
        .rev()
        .map(|back| {
            #[allow(clippy::cast_possible_wrap)]
            let date = today - Duration::days(back as i64);
            history.get(date).map_or(
                DayPoint {
                    date,
                    meditation_seconds: 0,
                    breathing_sessions: 0,
                },
                |r| DayPoint {
                    date,
                    meditation_seconds: r.meditation_duration,
                    breathing_sessions: r.breathing_sessions,
                },
            )
        })
        .collect()
}

/// The last seven days, ending today.
#[must_use]
pub fn weekly_series(history: &DailyHistory, today: NaiveDate) -> Vec<DayPoint> {
    daily_series(history, today, WEEK_DAYS)
}

/// The last twelve weeks, ending today.
#[must_use]
pub fn heatmap_series(history: &DailyHistory, today: NaiveDate) -> Vec<DayPoint> {
    daily_series(history, today, HEATMAP_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::PatternId;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    #[test]
    fn test_weekly_series_empty_history() {
        let series = weekly_series(&DailyHistory::new(), date(3, 10));
        assert_eq!(series.len(), WEEK_DAYS);
        assert_eq!(series[0].date, date(3, 4));
        assert_eq!(series[6].date, date(3, 10));
        assert!(series.iter().all(|p| !p.has_activity()));
    }

    #[test]
    fn test_weekly_series_fills_known_days() {
        let mut history = DailyHistory::new();
        history.record_meditation(date(3, 9), 420);
        history.record_breathing(date(3, 10), PatternId::Box);
        // Outside the window
        history.record_meditation(date(3, 1), 999);

        let series = weekly_series(&history, date(3, 10));
        assert_eq!(series[5].meditation_seconds, 420);
        assert_eq!(series[6].breathing_sessions, 1);
        assert_eq!(
            series.iter().map(|p| p.meditation_seconds).sum::<u64>(),
            420
        );
    }

    #[test]
    fn test_heatmap_spans_twelve_weeks() {
        let series = heatmap_series(&DailyHistory::new(), date(3, 31));
        assert_eq!(series.len(), HEATMAP_DAYS);
        assert_eq!(series[0].date, date(1, 7));
        assert!(series.windows(2).all(|w| w[1].date - w[0].date == Duration::days(1)));
    }

    #[test]
    fn test_activity_score() {
        let point = DayPoint {
            date: date(1, 1),
            meditation_seconds: 300,
            breathing_sessions: 2,
        };
        assert_eq!(point.activity_score(), 7);
    }
}
