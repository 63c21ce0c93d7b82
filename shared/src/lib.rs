//! Shared types for the seating workspace
//!
//! Domain models, request/response payloads and the unified error type
//! used by the allocation engine and any API surface built on top of it.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult};
pub use types::Timestamp;
