//! Session snapshots, so conversations survive a restart.
//!
//! The store stays in memory; a snapshot is a point-in-time copy written as
//! JSON and read back at startup.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PersistError;
use crate::session::{Session, UserId};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One user's saved session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Chat identifier.
    pub user: UserId,
    /// Saved state.
    pub session: Session,
}

/// A saved copy of every session in a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Format version for compatibility checking.
    pub version: u32,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// Saved sessions, ordered by user.
    pub sessions: Vec<SessionRecord>,
}

impl SessionSnapshot {
    /// Wrap records in a snapshot stamped with the current time.
    pub fn new(sessions: Vec<SessionRecord>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            sessions,
        }
    }

    /// Number of saved sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the snapshot holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Write the snapshot as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::debug!(path = %path.display(), sessions = self.len(), "saved sessions");
        Ok(())
    }

    /// Read a snapshot written by [`save_json`](Self::save_json).
    pub fn load_json(path: &Path) -> Result<Self, PersistError> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        tracing::debug!(path = %path.display(), sessions = snapshot.len(), "loaded sessions");
        Ok(snapshot)
    }
}
