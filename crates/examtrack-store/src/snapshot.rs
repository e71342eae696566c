//! Versioned JSON snapshot of attempts and cumulative stats.
//!
//! The format carries an explicit `version` field. Readers reject versions
//! they do not understand instead of guessing at field meanings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use examtrack_core::model::{Attempt, UserStats};

/// Current on-disk format version.
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub stats: UserStats,
    #[serde(default)]
    pub attempts: Vec<Attempt>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            stats: UserStats::default(),
            attempts: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0} (this build reads version {SNAPSHOT_VERSION})")]
    UnsupportedVersion(u32),
}

/// Load a snapshot, treating a missing file as an empty store.
pub fn load_or_default(path: &Path) -> Result<Snapshot, SnapshotError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no snapshot file; starting empty");
            return Ok(Snapshot::default());
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot: Snapshot = serde_json::from_str(&content)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot)
}

/// Write a snapshot as pretty JSON, creating parent directories as needed.
pub fn save(snapshot: &Snapshot, path: &Path) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), attempts = snapshot.attempts.len(), "snapshot saved");
    Ok(())
}
