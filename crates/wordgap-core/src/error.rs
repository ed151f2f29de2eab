//! Engine error types.
//!
//! Parse problems never show up here: malformed vocabulary lines are dropped
//! and corrupt saved progress is treated as empty. What remains are rejected
//! uploads and storage write failures.

use thiserror::Error;

/// Why a custom vocabulary upload was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// Only plain `.txt` files are accepted.
    #[error("expected a .txt file, got '{0}'")]
    WrongExtension(String),

    /// The file parsed to zero usable entries.
    #[error("vocabulary file is empty or has no valid `word | meaning` lines")]
    NoEntries,

    /// The file could not be read.
    #[error("failed to read vocabulary file: {0}")]
    Read(String),
}

/// Errors returned by [`GameEngine`](crate::engine::GameEngine) entry points.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// The repository failed to persist state. In-memory state is already
    /// updated and consistent.
    #[error("failed to save progress: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl GameError {
    /// Returns `true` if the error is a user-facing upload rejection.
    pub fn is_upload(&self) -> bool {
        matches!(self, GameError::Upload(_))
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;
