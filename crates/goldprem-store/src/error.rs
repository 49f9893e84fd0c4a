use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the history store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("history document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to commit history to {path}: {source}")]
    Commit {
        path: PathBuf,
        source: std::io::Error,
    },
}
