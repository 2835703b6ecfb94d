//! Achievements.
//!
//! Each achievement is a predicate over a [`StatsSnapshot`]. Evaluation is
//! pure; the caller adds newly earned achievements to its set, and nothing is
//! ever removed from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A named milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Achievement {
    /// Completed a first meditation session
    FirstSession,
    /// Completed a first breathing session
    FirstBreath,
    /// Three-day streak
    Streak3,
    /// Seven-day streak
    Streak7,
    /// Thirty-day streak
    Streak30,
    /// One hour of meditation in total
    Hour1,
    /// Ten hours of meditation in total
    Hours10,
    /// One hundred hours of meditation in total
    Hours100,
    /// Ten breathing sessions in total
    Breaths10,
    /// Met the daily goal
    DailyGoal,
}

impl Achievement {
    /// All achievements in display order.
    pub const ALL: [Self; 10] = [
        Self::FirstSession,
        Self::FirstBreath,
        Self::Streak3,
        Self::Streak7,
        Self::Streak30,
        Self::Hour1,
        Self::Hours10,
        Self::Hours100,
        Self::Breaths10,
        Self::DailyGoal,
    ];

    /// Short title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::FirstSession => "First Sit",
            Self::FirstBreath => "First Breath",
            Self::Streak3 => "Warming Up",
            Self::Streak7 => "One Week",
            Self::Streak30 => "Thirty Days",
            Self::Hour1 => "First Hour",
            Self::Hours10 => "Ten Hours",
            Self::Hours100 => "Hundred Hours",
            Self::Breaths10 => "Steady Breather",
            Self::DailyGoal => "Goal Reached",
        }
    }

    /// What it takes to earn it.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::FirstSession => "Complete your first meditation session",
            Self::FirstBreath => "Complete your first breathing session",
            Self::Streak3 => "Practice three days in a row",
            Self::Streak7 => "Practice seven days in a row",
            Self::Streak30 => "Practice thirty days in a row",
            Self::Hour1 => "Meditate for one hour in total",
            Self::Hours10 => "Meditate for ten hours in total",
            Self::Hours100 => "Meditate for one hundred hours in total",
            Self::Breaths10 => "Complete ten breathing sessions",
            Self::DailyGoal => "Meet your daily meditation goal",
        }
    }

    fn is_met(self, stats: &StatsSnapshot) -> bool {
        const HOUR: u64 = 3600;
        match self {
            Self::FirstSession => stats.completed_sessions >= 1,
            Self::FirstBreath => stats.breathing_sessions >= 1,
            Self::Streak3 => stats.streak_days >= 3,
            Self::Streak7 => stats.streak_days >= 7,
            Self::Streak30 => stats.streak_days >= 30,
            Self::Hour1 => stats.total_seconds >= HOUR,
            Self::Hours10 => stats.total_seconds >= 10 * HOUR,
            Self::Hours100 => stats.total_seconds >= 100 * HOUR,
            Self::Breaths10 => stats.breathing_sessions >= 10,
            Self::DailyGoal => {
                stats.daily_goal_seconds > 0 && stats.today_seconds >= stats.daily_goal_seconds
            }
        }
    }
}

impl std::fmt::Display for Achievement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Aggregates the achievement predicates look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// All-time meditation seconds
    pub total_seconds: u64,
    /// Meditation seconds today
    pub today_seconds: u64,
    /// Timer sessions run to completion
    pub completed_sessions: u32,
    /// All-time completed breathing sessions
    pub breathing_sessions: u32,
    /// Current streak
    pub streak_days: u32,
    /// Daily goal in seconds; zero disables the goal
    pub daily_goal_seconds: u64,
}

/// Achievements not yet in `earned` whose predicate now holds.
#[must_use]
pub fn evaluate_achievements(stats: &StatsSnapshot, earned: &Achievements) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| !earned.contains(*a) && a.is_met(stats))
        .collect()
}

/// Earned achievements.
///
/// Stored as a map of achievement name to `true`. Entries set to `false`
/// are ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Achievement, bool>", into = "BTreeMap<Achievement, bool>")]
pub struct Achievements {
    earned: BTreeSet<Achievement>,
}

impl Achievements {
    /// Check if `achievement` has been earned.
    #[must_use]
    pub fn contains(&self, achievement: Achievement) -> bool {
        self.earned.contains(&achievement)
    }

    /// Mark `achievement` as earned. Returns true if it was new.
    pub fn insert(&mut self, achievement: Achievement) -> bool {
        self.earned.insert(achievement)
    }

    /// Earned achievements in display order.
    pub fn iter(&self) -> impl Iterator<Item = Achievement> + '_ {
        self.earned.iter().copied()
    }

    /// Number earned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.earned.len()
    }

    /// Check if none have been earned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.earned.is_empty()
    }
}

impl From<BTreeMap<Achievement, bool>> for Achievements {
    fn from(flags: BTreeMap<Achievement, bool>) -> Self {
        Self {
            earned: flags
                .into_iter()
                .filter_map(|(a, earned)| earned.then_some(a))
                .collect(),
        }
    }
}

impl From<Achievements> for BTreeMap<Achievement, bool> {
    fn from(achievements: Achievements) -> Self {
        achievements.earned.into_iter().map(|a| (a, true)).collect()
    }
}
