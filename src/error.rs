//! Error types for serene.

use thiserror::Error;

/// Errors produced by the serene library and CLI.
#[derive(Debug, Error)]
pub enum SereneError {
    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The local storage database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be parsed or serialized.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An argument violated a precondition.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A named item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for SereneError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<rusqlite::Error> for SereneError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SereneError::InvalidInput("duration must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid input: duration must be positive");

        let err = SereneError::NotFound("pattern 'square'".to_string());
        assert_eq!(err.to_string(), "Not found: pattern 'square'");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: SereneError = json_err.into();
        assert!(matches!(err, SereneError::Parse(_)));
    }
}
