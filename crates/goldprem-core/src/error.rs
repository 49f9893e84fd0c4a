use thiserror::Error;

/// Validation errors exposed by `goldprem-core`.
///
/// Numeric readings are not validated through here: an unusable value either
/// fails adapter parsing (a `SourceError`) or makes the derivation undefined,
/// which skips the record instead of erroring.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date must be calendar ISO `YYYY-MM-DD`: '{value}'")]
    InvalidDate { value: String },
}
