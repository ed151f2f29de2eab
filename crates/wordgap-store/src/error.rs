//! Storage error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while writing player state to disk.
///
/// Reads never produce these: missing or corrupt files load as empty state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory could not be created.
    #[error("failed to create data directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// A state file could not be written.
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// A state file could not be removed.
    #[error("failed to remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },

    /// State could not be serialized.
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        source: serde_json::Error,
    },
}
