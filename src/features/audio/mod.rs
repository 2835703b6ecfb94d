//! Audio cues.
//!
//! Cues are fire-and-forget. The store plays them on state transitions;
//! failures are logged and otherwise ignored.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::SereneError;
use crate::features::breathing::Phase;

/// Something worth a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A timer or breathing session began
    SessionStart,
    /// A timer or breathing session finished
    SessionEnd,
    /// The breath moved to a new phase
    PhaseChange(Phase),
}

/// Ambient sound played during practice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundSound {
    /// Silence
    #[default]
    None,
    /// Rainfall
    Rain,
    /// Ocean waves
    Ocean,
    /// Forest ambience
    Forest,
    /// White noise
    WhiteNoise,
}

impl BackgroundSound {
    /// Parse from a user-supplied name.
    ///
    /// # Errors
    ///
    /// Returns `SereneError::NotFound` for unknown names.
    pub fn parse(s: &str) -> Result<Self, SereneError> {
        match s.trim().to_lowercase().as_str() {
            "none" | "off" | "silence" => Ok(Self::None),
            "rain" => Ok(Self::Rain),
            "ocean" | "waves" => Ok(Self::Ocean),
            "forest" => Ok(Self::Forest),
            "white-noise" | "whitenoise" | "noise" => Ok(Self::WhiteNoise),
            other => Err(SereneError::NotFound(format!("background sound '{other}'"))),
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Rain => "Rain",
            Self::Ocean => "Ocean",
            Self::Forest => "Forest",
            Self::WhiteNoise => "White Noise",
        }
    }
}

/// Plays cues.
#[cfg_attr(test, mockall::automock)]
pub trait CueSink {
    /// Play `cue`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cue could not be played. Callers ignore it.
    fn play(&self, cue: Cue) -> Result<(), SereneError>;
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&self, _cue: Cue) -> Result<(), SereneError> {
        Ok(())
    }
}

/// Rings the terminal bell on session start and end. Phase changes are
/// silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl CueSink for TerminalBell {
    fn play(&self, cue: Cue) -> Result<(), SereneError> {
        if matches!(cue, Cue::PhaseChange(_)) {
            return Ok(());
        }
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// Play `cue`, logging and discarding any error.
pub fn play_quietly(sink: &dyn CueSink, cue: Cue) {
    if let Err(e) = sink.play(cue) {
        tracing::debug!(?cue, error = %e, "audio cue failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_quietly_swallows_errors() {
        let mut sink = MockCueSink::new();
        sink.expect_play()
            .times(1)
            .returning(|_| Err(SereneError::Io(std::io::Error::other("no device"))));

        play_quietly(&sink, Cue::SessionStart);
    }

    #[test]
    fn test_silent_sink() {
        assert!(Silent.play(Cue::SessionEnd).is_ok());
    }

    #[test]
    fn test_background_sound_parse() {
        assert_eq!(BackgroundSound::parse("Rain").unwrap(), BackgroundSound::Rain);
        assert_eq!(BackgroundSound::parse("off").unwrap(), BackgroundSound::None);
        assert_eq!(
            BackgroundSound::parse("white-noise").unwrap(),
            BackgroundSound::WhiteNoise
        );
        assert!(BackgroundSound::parse("thunder").is_err());
    }

    #[test]
    fn test_background_sound_serde() {
        assert_eq!(
            serde_json::to_string(&BackgroundSound::WhiteNoise).unwrap(),
            r#""white-noise""#
        );
    }
}
