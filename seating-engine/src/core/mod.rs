//! Core module: configuration and engine errors

pub mod config;
pub mod error;

pub use config::EngineConfig;
pub use error::{AllocationError, AllocationResult};
