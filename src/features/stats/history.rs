//! Per-day practice records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::features::breathing::PatternId;

/// Practice done on one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyRecord {
    /// Seconds of meditation credited to this day
    pub meditation_duration: u64,
    /// Breathing sessions completed this day
    pub breathing_sessions: u32,
    /// Completed breathing sessions per pattern
    pub breathing_modes: BTreeMap<PatternId, u32>,
}

impl DailyRecord {
    /// Check if any practice was recorded.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.meditation_duration > 0 || self.breathing_sessions > 0
    }
}

/// Daily records keyed by date.
///
/// Serialized as a JSON object of `"YYYY-MM-DD"` keys. Records are created on
/// the first activity of a day and only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyHistory {
    days: BTreeMap<NaiveDate, DailyRecord>,
}

impl DailyHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `date`, if any practice happened that day.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.days.get(&date)
    }

    /// Check if `date` has any recorded practice.
    #[must_use]
    pub fn has_activity(&self, date: NaiveDate) -> bool {
        self.days.get(&date).is_some_and(DailyRecord::has_activity)
    }

    /// Add meditation seconds to `date`. Zero seconds leaves the history
    /// untouched.
    pub fn record_meditation(&mut self, date: NaiveDate, seconds: u64) {
        if seconds == 0 {
            return;
        }
        let record = self.days.entry(date).or_default();
        record.meditation_duration = record.meditation_duration.saturating_add(seconds);
    }

    /// Count a completed breathing session on `date`.
    pub fn record_breathing(&mut self, date: NaiveDate, pattern_id: PatternId) {
        let record = self.days.entry(date).or_default();
        record.breathing_sessions = record.breathing_sessions.saturating_add(1);
        *record.breathing_modes.entry(pattern_id).or_default() += 1;
    }

    /// Meditation seconds recorded on `date`.
    #[must_use]
    pub fn meditation_seconds_on(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).map_or(0, |r| r.meditation_duration)
    }

    /// Completed breathing sessions per pattern across all days.
    #[must_use]
    pub fn pattern_usage(&self) -> BTreeMap<PatternId, u32> {
        let mut usage = BTreeMap::new();
        for record in self.days.values() {
            for (id, count) in &record.breathing_modes {
                *usage.entry(*id).or_default() += count;
            }
        }
        usage
    }

    /// Dates with practice, oldest first.
    pub fn active_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(|(_, r)| r.has_activity())
            .map(|(d, _)| *d)
    }

    /// Iterate records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DailyRecord)> {
        self.days.iter()
    }

    /// Number of days with a record.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
