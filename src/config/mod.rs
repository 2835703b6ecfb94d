//! Configuration management for serene.
//!
//! This module handles loading and saving configuration from `~/.serene/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{BreathingConfig, ColorSetting, Config, GeneralConfig, StorageConfig, TimerConfig};
