//! Common types for the shared crate

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Current time as a [`Timestamp`]
pub fn now() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
