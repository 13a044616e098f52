//! JSON snapshot persistence for the task store.
//!
//! The on-disk format is a single JSON document `{ "tasks": [...] }`, read
//! fully into memory at startup and rewritten fully after every mutation.
//! Writes go to a temporary file in the same directory followed by a rename,
//! so a crash mid-write never leaves a truncated document behind. Caller
//! serialization (the app state's write lock) makes the read-modify-write
//! cycle single-writer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use taskboard_core::Task;

/// Errors that can occur while loading or saving the snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// Failed to read the snapshot file.
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the snapshot file.
    #[error("failed to write snapshot {path}: {source}")]
    Write {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot file is not valid JSON for the expected shape.
    #[error("failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The on-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SnapshotDoc {
    tasks: Vec<Task>,
}

/// Handle to the JSON snapshot file backing the task store.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    /// Creates a handle for the given path. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the snapshot path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all tasks from the snapshot. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(&self) -> Result<Vec<Task>, PersistError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(PersistError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };
        let doc: SnapshotDoc = serde_json::from_str(&contents)?;
        Ok(doc.tasks)
    }

    /// Rewrites the snapshot with the given tasks.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Write`] if the temporary file cannot be
    /// written or renamed into place.
    pub fn save(&self, tasks: &[Task]) -> Result<(), PersistError> {
        let doc = SnapshotDoc {
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_string_pretty(&doc)?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(|e| PersistError::Write {
            path: tmp_path.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| PersistError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
