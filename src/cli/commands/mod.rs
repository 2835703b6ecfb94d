//! Command implementations for serene.
//!
//! Each handler takes the open [`Context`], applies the command to the
//! practice store and returns the text to print.

mod breathe;
mod completions;
mod pattern;
mod settings;
mod stats;
mod timer;

pub use breathe::breathe;
pub use completions::{completion_install_instructions, completions, generate_completions, shell_from_str};
pub use pattern::pattern;
pub use settings::settings;
pub use stats::stats;
pub use timer::timer;

use std::time::Duration;

use colored::Colorize;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::core::SystemClock;
use crate::error::SereneError;
use crate::features::audio::{BackgroundSound, Silent, TerminalBell};
use crate::features::stats::Achievement;
use crate::output::to_json;
use crate::storage::{Database, SqliteStorage, StorageBackend};
use crate::store::{corrupt_key, MeditationStore, PersistedState};

/// Everything a command needs: configuration, storage and the hydrated
/// practice store.
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Output format for this invocation
    pub format: OutputFormat,
    /// Practice state
    pub store: MeditationStore,
    storage: SqliteStorage,
}

impl Context {
    /// Open the database under `paths` and hydrate the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or database cannot be opened.
    /// Unreadable saved state is not an error; defaults are used instead.
    pub fn open(paths: &Paths, config: Config, format: OutputFormat) -> Result<Self, SereneError> {
        let storage = SqliteStorage::with_database(Database::open_with_paths(paths)?);

        let fallback = PersistedState {
            timer_duration: config.default_duration_seconds(),
            selected_pattern: config.breathing.default_pattern,
            ..PersistedState::default()
        };
        let mut store = MeditationStore::load(
            &storage,
            &config.storage.namespace,
            fallback,
            Box::new(SystemClock),
            Box::new(Silent),
        );
        if format == OutputFormat::Pretty
            && store.settings().background_sound != BackgroundSound::None
        {
            store.set_cue_sink(Box::new(TerminalBell));
        }

        Ok(Self {
            config,
            format,
            store,
            storage,
        })
    }

    /// Persist the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    pub fn save(&self) -> Result<(), SereneError> {
        self.store.save(&self.storage, &self.config.storage.namespace)
    }

    /// Wall-clock time per tick, honoring a command-line override.
    #[must_use]
    pub fn tick_interval(&self, override_ms: Option<u64>) -> Duration {
        Duration::from_millis(override_ms.unwrap_or(self.config.timer.tick_interval_ms))
    }

    fn clear(&self) -> Result<bool, SereneError> {
        let namespace = &self.config.storage.namespace;
        let kept_copy = self.storage.remove_item(&corrupt_key(namespace))?;
        Ok(self.storage.remove_item(namespace)? || kept_copy)
    }
}

/// Delete all saved practice data.
///
/// # Errors
///
/// Returns `SereneError::InvalidInput` without `--force`, or an error if the
/// storage cannot be written.
pub fn reset(ctx: &Context, force: bool) -> Result<String, SereneError> {
    if !force {
        return Err(SereneError::InvalidInput(
            "this deletes all statistics, achievements and settings; rerun with --force"
                .to_string(),
        ));
    }

    let removed = ctx.clear()?;
    tracing::info!(removed, "saved state cleared");

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({ "reset": true, "removed": removed })),
        OutputFormat::Pretty => Ok(if removed {
            "All practice data deleted.".to_string()
        } else {
            "Nothing to delete.".dimmed().to_string()
        }),
    }
}

/// Lines announcing newly unlocked achievements.
fn achievement_lines(unlocked: &[Achievement]) -> Vec<String> {
    unlocked
        .iter()
        .map(|a| {
            format!(
                "🏆 Achievement unlocked: {}  {}",
                a.title().yellow().bold(),
                a.description().dimmed()
            )
        })
        .collect()
}
