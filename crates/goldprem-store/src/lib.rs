//! Flat-JSON persistence for the reconciled premium history.
//!
//! The on-disk document is exactly `{ "lastUpdated": ..., "data": [...] }`
//! with the frozen record field names from `goldprem-core`. Saves are atomic:
//! the new document is written to a temp file in the target directory and
//! renamed over the old one, so an interrupted run leaves the previous file
//! intact. A run either completes and persists, or persists nothing.

mod error;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use goldprem_core::PremiumHistory;

pub use error::StoreError;

/// File-backed store for the history document.
///
/// Single-writer by design: the load-mutate-save cycle is not atomic across
/// processes, so concurrent invocations must be serialized by the caller.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted history. A missing file is an empty history, not
    /// an error; a present-but-malformed file is.
    pub fn load(&self) -> Result<PremiumHistory, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PremiumHistory::empty());
            }
            Err(error) => return Err(StoreError::Io(error)),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    /// Serialize and atomically replace the document on disk.
    pub fn save(&self, history: &PremiumHistory) -> Result<(), StoreError> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let body = serde_json::to_vec_pretty(history)?;

        let mut staged = tempfile::NamedTempFile::new_in(parent)?;
        staged.write_all(&body)?;
        staged.flush()?;
        staged
            .persist(&self.path)
            .map_err(|error| StoreError::Commit {
                path: self.path.clone(),
                source: error.error,
            })?;

        Ok(())
    }
}
