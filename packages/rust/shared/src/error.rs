//! Error types for TopicPress.
//!
//! Library crates use [`TopicPressError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all TopicPress operations.
#[derive(Debug, thiserror::Error)]
pub enum TopicPressError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The generation service credential is absent from the environment.
    #[error("missing credential: set the {var} environment variable")]
    MissingCredential { var: String },

    /// Transport-level HTTP failure talking to the generation service.
    #[error("network error: {0}")]
    Network(String),

    /// The generation service answered, but not with usable text.
    #[error("generation error: {0}")]
    Generation(String),

    /// Response or file parsing error.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catalog or input validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TopicPressError>;

impl TopicPressError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is a fatal precondition rather than a runtime failure.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }
}
