//! Error types for habitual.

use thiserror::Error;

/// Errors that can occur in habitual operations.
#[derive(Error, Debug)]
pub enum HabitualError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("First weekday must be between 1 (Sunday) and 7 (Saturday), got {0}")]
    InvalidWeekday(String),

    #[error("Unknown theme '{0}'. Available: light, dark, ocean, sunset")]
    UnknownTheme(String),

    #[error("Could not parse time of day: \"{0}\"")]
    InvalidTime(String),

    #[error("A profile edit is already in progress")]
    AlreadyEditing,

    #[error("No profile edit in progress")]
    NotEditing,

    #[error("Calendar access denied: {0}")]
    AccessDenied(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for habitual operations.
pub type HabitualResult<T> = Result<T, HabitualError>;
