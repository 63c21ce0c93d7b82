//! Unified error type for the seating workspace
//!
//! Every fallible operation in `shared` and the engine surface resolves to
//! [`AppError`]. Engine-internal layers define their own error enums and
//! convert into this type at the boundary.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation before any mutation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation conflicts with current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Domain rule violation
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Backing store failure (transaction rolled back)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    // ========== Convenient constructors ==========

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Create a BusinessRule error
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule(message.into())
    }

    /// Create a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

/// Result type for workspace operations
pub type AppResult<T> = Result<T, AppError>;
