//! Error handling for the Ezpl library.
//!
//! This module provides centralized error handling. Only input validation and
//! file I/O ever surface as errors: rendering to the terminal is cosmetic, so
//! render failures are logged through `tracing` and swallowed instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen when using Ezpl.
#[derive(Error, Debug)]
pub enum Error {
    /// The caller supplied an input that cannot be accepted.
    ///
    /// This covers unknown level, pattern or layer names, duplicate stage
    /// names, more than one umbrella stage, missing stage fields, and update
    /// shapes a layer kind does not support. It is always raised at the call
    /// site and never swallowed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A layered progress session already owns the terminal.
    ///
    /// Only one session may render at a time; opening a second one while the
    /// first is alive fails fast instead of interleaving output.
    #[error("A layered progress session is already active")]
    SessionActive,

    /// A configuration value is out of range or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The file logger could not open or write its log file.
    #[error("File operation failed on {path:?}")]
    FileOperation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error from the serde_json library.
    #[error("JSON error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Shorthand for building a [`Error::Validation`].
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}

/// Result type alias for operations that can fail with an Ezpl error.
pub type Result<T> = std::result::Result<T, Error>;
