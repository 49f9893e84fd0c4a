use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] goldprem_core::ValidationError),

    /// The incremental path lacks a reading it cannot proceed without; the
    /// run aborts before the history file is touched.
    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("upstream source failure: {0}")]
    Source(#[from] goldprem_core::SourceError),

    #[error(transparent)]
    Store(#[from] goldprem_store::StoreError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::MissingInput(_) => 3,
            Self::Source(_) => 4,
            Self::Store(_) => 5,
            Self::Serialization(_) => 6,
            Self::Io(_) => 10,
        }
    }
}
