//! Engine error types
//!
//! [`AllocationError`] is the engine's surface error. Store failures are
//! wrapped, never swallowed: the caller must assume the transaction rolled
//! back and may retry the whole operation idempotently, since ordering is
//! deterministic.

use thiserror::Error;

use crate::store::StoreError;
use shared::AppError;

/// Allocation error types
#[derive(Debug, Error)]
pub enum AllocationError {
    /// The filters selected zero guests; nothing was mutated
    #[error("No guests matched the allocation filters")]
    EmptySelection,

    /// Incremental run found nobody left to seat; nothing was mutated
    #[error("All guests in this event are already seated")]
    AllGuestsSeated,

    /// Request payload failed validation before any mutation
    #[error("Invalid allocation request: {0}")]
    InvalidRequest(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backing store failure; the enclosing transaction rolled back
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<AppError> for AllocationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(resource) => Self::NotFound(resource),
            AppError::Storage(message) => Self::Store(StoreError::Backend(message)),
            other => Self::InvalidRequest(other.to_string()),
        }
    }
}

/// Result type for engine operations
pub type AllocationResult<T> = Result<T, AllocationError>;
