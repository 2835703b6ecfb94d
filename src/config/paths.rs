//! Path resolution for serene configuration and data files.
//!
//! All serene data is stored in `~/.serene/`:
//! - `config.yaml` - Main configuration file
//! - `serene.db` - `SQLite` database holding saved practice state

use std::path::PathBuf;

use crate::error::SereneError;

/// Paths to serene configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.serene/`
    pub root: PathBuf,
    /// Config file: `~/.serene/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.serene/serene.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, SereneError> {
        let home = std::env::var("HOME").map_err(|_| {
            SereneError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".serene")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("serene.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), SereneError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                SereneError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
