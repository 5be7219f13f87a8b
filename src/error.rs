//! Error types for the programme guide.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the programme guide.
#[derive(Error, Debug)]
pub enum Error {
    // Model errors
    #[error("Invalid programme interval: start {start} is not before stop {stop}")]
    InvalidInterval {
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    },

    #[error("Programme belongs to channel {found}, not {expected}")]
    ChannelMismatch { expected: String, found: String },

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    #[error("Programme not found: {0}")]
    ProgrammeNotFound(String),

    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    // Loader errors
    #[error("Invalid guide file: {0}")]
    InvalidGuideFile(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Config errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    // Generic errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}
