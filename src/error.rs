//! Error types for autotrack.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum AutotrackError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Send error: {0}")]
    Send(#[from] SendError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Run error: {0}")]
    Run(#[from] RunError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors. Always raised before the control loop starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration value: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Errors from opening the command channel.
#[derive(Error, Debug)]
pub enum ChannelError {
    /// The peripheral could not be reached. The loop continues without it.
    #[error("Peripheral unavailable on {port}: {reason}")]
    Unavailable { port: String, reason: String },

    /// `open` was called on a channel that already left the unopened state.
    #[error("Channel cannot be opened from state {0}")]
    InvalidState(&'static str),
}

/// Outcome of a failed write on the command channel.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("No peripheral connected")]
    NoChannel,

    #[error("Channel is closed")]
    Closed,

    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Wire format errors, only raised when decoding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Malformed command line: {0:?}")]
    Malformed(String),

    #[error("Unknown direction: {0:?}")]
    UnknownDirection(String),

    #[error("Invalid magnitude: {0:?}")]
    InvalidMagnitude(String),
}

/// Errors that terminate a control loop run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Frame acquisition failed after {frames} frame(s): {reason}")]
    Acquisition { frames: u64, reason: String },

    #[error("Frame source exhausted after {frames} frame(s)")]
    SourceExhausted { frames: u64 },
}

/// Result type alias for autotrack operations
pub type Result<T> = std::result::Result<T, AutotrackError>;
