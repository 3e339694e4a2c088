//! Error types for the state store and the command handlers

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the state file
#[derive(Error, Debug)]
pub enum StoreError {
    /// The file could not be read, created or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold a valid state record.
    #[error("malformed state in {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode state: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Errors surfaced by the command handlers
///
/// Store failures never reach this type: they are reported as notifications
/// and the command carries on.
#[derive(Error, Debug)]
pub enum PomodoroError {
    /// Another thread panicked while holding the session guard.
    #[error("failed to lock session state: {0}")]
    LockPoisoned(String),
}
