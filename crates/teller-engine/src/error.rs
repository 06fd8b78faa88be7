//! Error types for the engine.

use teller_core::StoryError;
use thiserror::Error;

use crate::session::UserId;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Why a single transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    /// The user named a story that is not in the catalog.
    #[error("unknown story: \"{0}\"")]
    UnknownStory(String),

    /// The text matches none of the current page's options.
    #[error(transparent)]
    InvalidChoice(StoryError),

    /// The session points at a story or page the catalog does not have.
    #[error(transparent)]
    UnknownPage(StoryError),
}

impl TurnError {
    /// Whether the user caused this error and can simply try again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::UnknownPage(_))
    }
}

impl From<StoryError> for TurnError {
    fn from(error: StoryError) -> Self {
        match error {
            StoryError::InvalidChoice { .. } => Self::InvalidChoice(error),
            StoryError::UnknownPage { .. } => Self::UnknownPage(error),
        }
    }
}

/// Failures that are bugs rather than user mistakes.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A session cursor does not resolve against the catalog.
    #[error("session of user {user} is inconsistent with the catalog: {source}")]
    Inconsistent {
        /// Affected user.
        user: UserId,
        /// The failed lookup.
        source: StoryError,
    },
}

/// Errors while saving or loading session snapshots.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the snapshot file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot is not valid JSON for this format.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot was written by an incompatible version.
    #[error("snapshot version mismatch: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version this build understands.
        expected: u32,
        /// Version found in the file.
        found: u32,
    },
}
