//! Error types for the room store.

use std::path::PathBuf;

/// Errors that can occur while persisting a turn.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the turn log failed.
    #[error("turn log IO error at {}: {source}", .path.display())]
    Io {
        /// The log file involved.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A log entry could not be serialized or parsed.
    #[error("turn log serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
