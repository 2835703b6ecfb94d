//! Practice state owner.
//!
//! `MeditationStore` holds the session timer, the breathing cycle, the
//! per-day history and the aggregates derived from it. It is built
//! explicitly with a clock and a cue sink, hydrated with [`MeditationStore::load`]
//! and written back with [`MeditationStore::save`].

mod persisted;
mod settings;

pub use persisted::{PersistedState, STATE_VERSION};
pub use settings::{Settings, Theme, DEFAULT_DAILY_GOAL_MINUTES, DEFAULT_VOLUME};

use chrono::NaiveDate;

use crate::core::Clock;
use crate::error::SereneError;
use crate::features::audio::{play_quietly, BackgroundSound, Cue, CueSink};
use crate::features::breathing::{BreathEvent, BreathingCycle, BreathingPattern, PatternId};
use crate::features::stats::{
    compute_streak, evaluate_achievements, heatmap_series, weekly_series, Achievement,
    Achievements, DailyHistory, DayPoint, StatsSnapshot, StreakInfo,
};
use crate::features::timer::{SessionTimer, TickOutcome};
use crate::storage::StorageBackend;

/// Key a corrupt blob stored under `key` is copied to.
#[must_use]
pub fn corrupt_key(key: &str) -> String {
    format!("{key}.corrupt")
}

/// Practice state and the actions that change it.
pub struct MeditationStore {
    clock: Box<dyn Clock>,
    cues: Box<dyn CueSink>,
    settings: Settings,
    timer: SessionTimer,
    breathing: BreathingCycle,
    history: DailyHistory,
    total_duration_seconds: u64,
    breathing_session_count: u32,
    streak_days: u32,
    achievements: Achievements,
    unannounced: Vec<Achievement>,
}

impl std::fmt::Debug for MeditationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeditationStore")
            .field("settings", &self.settings)
            .field("timer", &self.timer)
            .field("breathing", &self.breathing)
            .field("total_duration_seconds", &self.total_duration_seconds)
            .field("breathing_session_count", &self.breathing_session_count)
            .field("streak_days", &self.streak_days)
            .finish_non_exhaustive()
    }
}

impl MeditationStore {
    /// Create a store with default state.
    pub fn new(clock: Box<dyn Clock>, cues: Box<dyn CueSink>) -> Self {
        Self::from_persisted(PersistedState::default(), clock, cues)
    }

    /// Rebuild a store from a saved blob.
    ///
    /// The streak is recomputed against today rather than trusted, and any
    /// achievement the saved totals already meet is awarded.
    pub fn from_persisted(
        state: PersistedState,
        clock: Box<dyn Clock>,
        cues: Box<dyn CueSink>,
    ) -> Self {
        let mut settings = Settings::default();
        settings.theme = state.theme;
        settings.background_sound = state.background_sound;
        settings.daily_goal_minutes = state.daily_goal;
        settings.selected_pattern = state.selected_pattern;
        settings.custom_pattern = state.custom_pattern;
        settings.set_volume(state.volume);

        let timer = SessionTimer::with_duration(state.timer_duration)
            .unwrap_or_default()
            .with_completed_cycles(state.session_count);
        let breathing = BreathingCycle::new(settings.selected_pattern, settings.active_pattern());
        let streak_days = compute_streak(&state.daily_history, clock.today());

        let mut store = Self {
            clock,
            cues,
            settings,
            timer,
            breathing,
            history: state.daily_history,
            total_duration_seconds: state.total_duration,
            breathing_session_count: state.breathing_sessions,
            streak_days,
            achievements: state.achievements,
            unannounced: Vec::new(),
        };
        store.refresh_achievements();
        store
    }

    /// Hydrate from `storage[key]`.
    ///
    /// A missing, unreadable or corrupt blob yields `fallback`; hydration
    /// never fails. A corrupt blob is copied to [`corrupt_key`] first so the
    /// next save does not destroy it.
    pub fn load(
        storage: &dyn StorageBackend,
        key: &str,
        fallback: PersistedState,
        clock: Box<dyn Clock>,
        cues: Box<dyn CueSink>,
    ) -> Self {
        let state = match storage.get_item(key) {
            Ok(Some(json)) => PersistedState::from_json(&json).unwrap_or_else(|e| {
                let backup = corrupt_key(key);
                match storage.set_item(&backup, &json) {
                    Ok(()) => tracing::warn!(
                        key,
                        %backup,
                        error = %e,
                        "stored state is corrupt, copied it aside and using defaults"
                    ),
                    Err(copy_err) => tracing::warn!(
                        key,
                        error = %e,
                        copy_error = %copy_err,
                        "stored state is corrupt and could not be copied, using defaults"
                    ),
                }
                fallback
            }),
            Ok(None) => {
                tracing::debug!(key, "no stored state, using defaults");
                fallback
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "could not read stored state, using defaults");
                fallback
            }
        };
        Self::from_persisted(state, clock, cues)
    }

    /// Write the current state to `storage[key]`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save(&self, storage: &dyn StorageBackend, key: &str) -> Result<(), SereneError> {
        let json = self.to_persisted().to_json()?;
        storage.set_item(key, &json)?;
        tracing::debug!(key, bytes = json.len(), "state saved");
        Ok(())
    }

    /// Snapshot of everything that survives a restart.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            version: STATE_VERSION,
            theme: self.settings.theme,
            today_duration: self.today_duration_seconds(),
            total_duration: self.total_duration_seconds,
            session_count: self.timer.completed_cycles(),
            breathing_sessions: self.breathing_session_count,
            timer_duration: self.timer.duration_seconds(),
            selected_pattern: self.settings.selected_pattern,
            custom_pattern: self.settings.custom_pattern,
            background_sound: self.settings.background_sound,
            volume: self.settings.volume(),
            streak: self.streak_days,
            daily_history: self.history.clone(),
            daily_goal: self.settings.daily_goal_minutes,
            achievements: self.achievements.clone(),
        }
    }

    /// Replace the cue sink.
    pub fn set_cue_sink(&mut self, cues: Box<dyn CueSink>) {
        self.cues = cues;
    }

    // Timer

    /// Start a timer run. An active run is credited first.
    ///
    /// # Errors
    ///
    /// Returns `SereneError::InvalidInput` if the duration is zero.
    pub fn start_timer(&mut self, duration_seconds: u32) -> Result<(), SereneError> {
        let carried = self.timer.start(duration_seconds)?;
        self.credit_meditation(carried);
        tracing::debug!(duration_seconds, "timer started");
        play_quietly(self.cues.as_ref(), Cue::SessionStart);
        Ok(())
    }

    /// Advance the timer one second.
    pub fn tick_timer(&mut self) -> TickOutcome {
        let outcome = self.timer.tick();
        if let TickOutcome::Completed { credited } = outcome {
            tracing::info!(
                duration_seconds = self.timer.duration_seconds(),
                sessions = self.timer.completed_cycles(),
                "meditation session complete"
            );
            self.credit_meditation(credited);
            play_quietly(self.cues.as_ref(), Cue::SessionEnd);
        }
        outcome
    }

    /// Pause the timer, crediting the elapsed time. Returns false if it was
    /// not running.
    pub fn pause_timer(&mut self) -> bool {
        if !self.timer.is_running() {
            return false;
        }
        let credit = self.timer.pause();
        self.credit_meditation(credit);
        tracing::debug!(remaining = self.timer.remaining_seconds(), "timer paused");
        true
    }

    /// Resume a paused timer.
    pub fn resume_timer(&mut self) -> bool {
        self.timer.resume()
    }

    /// Reset the timer to its full duration, crediting uncounted time.
    pub fn reset_timer(&mut self) {
        let credit = self.timer.reset();
        self.credit_meditation(credit);
        tracing::debug!("timer reset");
    }

    /// Change the configured length of an idle timer.
    ///
    /// # Errors
    ///
    /// Returns `SereneError::InvalidInput` if the duration is zero or a run
    /// is in progress.
    pub fn set_timer_duration(&mut self, duration_seconds: u32) -> Result<(), SereneError> {
        if self.timer.is_active() {
            return Err(SereneError::InvalidInput(
                "cannot change the duration of an active timer".to_string(),
            ));
        }
        let cycles = self.timer.completed_cycles();
        self.timer = SessionTimer::with_duration(duration_seconds)?.with_completed_cycles(cycles);
        Ok(())
    }

    // Breathing

    /// Start a breathing session with the selected pattern.
    pub fn start_breathing(&mut self) {
        self.breathing
            .start(self.settings.selected_pattern, self.settings.active_pattern());
        tracing::debug!(pattern = %self.settings.selected_pattern, "breathing started");
        play_quietly(self.cues.as_ref(), Cue::SessionStart);
    }

    /// Advance the breathing session one second.
    pub fn tick_breathing(&mut self) -> BreathEvent {
        let event = self.breathing.tick();
        match event {
            BreathEvent::PhaseChanged { to, .. } => {
                play_quietly(self.cues.as_ref(), Cue::PhaseChange(to));
            }
            BreathEvent::SessionCompleted { pattern_id } => {
                self.record_breathing(pattern_id);
                play_quietly(self.cues.as_ref(), Cue::SessionEnd);
            }
            BreathEvent::Idle | BreathEvent::Continue => {}
        }
        event
    }

    /// Pause the breathing session.
    pub fn pause_breathing(&mut self) -> bool {
        self.breathing.pause()
    }

    /// Resume the breathing session.
    pub fn resume_breathing(&mut self) -> bool {
        self.breathing.resume()
    }

    /// Abandon the breathing session without recording it.
    pub fn stop_breathing(&mut self) -> bool {
        self.breathing.stop()
    }

    /// Select the pattern for breathing. A session in progress switches at
    /// its next phase boundary.
    pub fn select_pattern(&mut self, pattern_id: PatternId) {
        self.settings.selected_pattern = pattern_id;
        self.breathing
            .set_pattern(pattern_id, self.settings.active_pattern());
    }

    /// Replace the custom pattern's timings.
    pub fn set_custom_pattern(&mut self, pattern: BreathingPattern) {
        self.settings.custom_pattern = pattern;
        if self.settings.selected_pattern == PatternId::Custom {
            self.breathing.set_pattern(PatternId::Custom, pattern);
        }
    }

    // Settings

    /// Set the color theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    /// Set the ambient sound.
    pub fn set_background_sound(&mut self, sound: BackgroundSound) {
        self.settings.background_sound = sound;
    }

    /// Set the ambient volume, clamped to 0.0 - 1.0.
    pub fn set_volume(&mut self, volume: f32) {
        self.settings.set_volume(volume);
    }

    /// Set the daily goal in minutes. Reaching a lower goal may unlock the
    /// daily goal achievement immediately.
    pub fn set_daily_goal(&mut self, minutes: u32) {
        self.settings.daily_goal_minutes = minutes;
        self.refresh_achievements();
    }

    // Statistics

    fn credit_meditation(&mut self, seconds: u32) {
        if seconds == 0 {
            return;
        }
        let today = self.clock.today();
        self.history.record_meditation(today, u64::from(seconds));
        self.total_duration_seconds += u64::from(seconds);
        tracing::debug!(seconds, %today, "meditation credited");
        self.refresh_streak();
        self.refresh_achievements();
    }

    fn record_breathing(&mut self, pattern_id: PatternId) {
        let today = self.clock.today();
        self.history.record_breathing(today, pattern_id);
        self.breathing_session_count += 1;
        tracing::info!(
            %pattern_id,
            sessions = self.breathing_session_count,
            "breathing session complete"
        );
        self.refresh_streak();
        self.refresh_achievements();
    }

    /// Recompute the streak from the history.
    pub fn refresh_streak(&mut self) -> u32 {
        self.streak_days = compute_streak(&self.history, self.clock.today());
        self.streak_days
    }

    /// Award any achievements whose conditions now hold, returning the new
    /// ones.
    pub fn refresh_achievements(&mut self) -> Vec<Achievement> {
        let earned = evaluate_achievements(&self.snapshot(), &self.achievements);
        for achievement in &earned {
            self.achievements.insert(*achievement);
            tracing::info!(%achievement, "achievement unlocked");
        }
        self.unannounced.extend(earned.iter().copied());
        earned
    }

    /// Achievements unlocked since the last call.
    pub fn take_new_achievements(&mut self) -> Vec<Achievement> {
        std::mem::take(&mut self.unannounced)
    }

    /// Aggregates the achievement table is checked against.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_seconds: self.total_duration_seconds,
            today_seconds: self.today_duration_seconds(),
            completed_sessions: self.timer.completed_cycles(),
            breathing_sessions: self.breathing_session_count,
            streak_days: self.streak_days,
            daily_goal_seconds: self.settings.daily_goal_seconds(),
        }
    }

    /// Meditation seconds credited today.
    #[must_use]
    pub fn today_duration_seconds(&self) -> u64 {
        self.history.meditation_seconds_on(self.clock.today())
    }

    /// All-time meditation seconds.
    #[must_use]
    pub const fn total_duration_seconds(&self) -> u64 {
        self.total_duration_seconds
    }

    /// All-time completed breathing sessions.
    #[must_use]
    pub const fn breathing_session_count(&self) -> u32 {
        self.breathing_session_count
    }

    /// Current streak in days.
    #[must_use]
    pub const fn streak_days(&self) -> u32 {
        self.streak_days
    }

    /// Current and longest streak details.
    #[must_use]
    pub fn streak_info(&self) -> StreakInfo {
        StreakInfo::calculate(&self.history, self.clock.today())
    }

    /// Fraction of today's goal met, capped at 1.0. Zero when no goal is set.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn daily_goal_progress(&self) -> f64 {
        let goal = self.settings.daily_goal_seconds();
        if goal == 0 {
            return 0.0;
        }
        (self.today_duration_seconds() as f64 / goal as f64).min(1.0)
    }

    /// The last seven days, oldest first.
    #[must_use]
    pub fn weekly_series(&self) -> Vec<DayPoint> {
        weekly_series(&self.history, self.clock.today())
    }

    /// The last twelve weeks, oldest first.
    #[must_use]
    pub fn heatmap_series(&self) -> Vec<DayPoint> {
        heatmap_series(&self.history, self.clock.today())
    }

    /// Today's date according to the store's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Earned achievements.
    #[must_use]
    pub const fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    /// Per-day records.
    #[must_use]
    pub const fn history(&self) -> &DailyHistory {
        &self.history
    }

    /// User preferences.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The session timer.
    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    /// The breathing cycle.
    #[must_use]
    pub const fn breathing(&self) -> &BreathingCycle {
        &self.breathing
    }
}
