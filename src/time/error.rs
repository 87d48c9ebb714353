use thiserror::Error;

/// Errors produced while parsing day/time strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Unknown day code: {0}")]
    UnknownDay(String),

    #[error("Invalid clock time: {0}")]
    InvalidClock(String),

    #[error("Malformed meeting time (expected e.g. \"MoWeFr 10:00AM - 11:00AM\"): {0}")]
    Malformed(String),

    #[error("Meeting ends before it starts: {0}")]
    Reversed(String),
}
