use std::io;
use thiserror::Error;

/// Custom error type for wmstatus
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Short read at offset {offset}: expected {expected} bytes, got {got}")]
    ShortRead {
        offset: u64,
        expected: usize,
        got: usize,
    },

    #[error("Field not found: {0}")]
    FieldNotFound(String),

    #[error("Setup error: {0}")]
    Setup(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signal error: {0}")]
    Signal(String),
}

/// Result type alias for wmstatus
pub type Result<T> = std::result::Result<T, StatusError>;

impl StatusError {
    pub fn field_not_found<S: Into<String>>(label: S) -> Self {
        StatusError::FieldNotFound(label.into())
    }

    /// Create a setup error
    pub fn setup<S: Into<String>>(msg: S) -> Self {
        StatusError::Setup(msg.into())
    }

    pub fn query<S: Into<String>>(msg: S) -> Self {
        StatusError::Query(msg.into())
    }

    pub fn publish<S: Into<String>>(msg: S) -> Self {
        StatusError::Publish(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        StatusError::Config(msg.into())
    }

    /// Capture `errno` from the last failed libc call
    pub fn last_os_signal<S: Into<String>>(context: S) -> Self {
        StatusError::Signal(format!("{}: {}", context.into(), io::Error::last_os_error()))
    }
}
