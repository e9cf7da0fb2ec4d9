//! Error types for fsrs-core.

use thiserror::Error;

/// Result type alias using FsrsError.
pub type Result<T> = std::result::Result<T, FsrsError>;

/// Errors surfaced by the scheduling engine.
///
/// Every variant is a caller-side programming error; nothing here is
/// retryable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FsrsError {
    #[error("expected exactly 17 weights, got {found}")]
    InvalidWeightCount { found: usize },

    #[error("cannot roll back a manual rating")]
    ManualRollback,
}
