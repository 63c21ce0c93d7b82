//! Seating allocation engine
//!
//! Single-pass allocation of event guests into tables: deterministic
//! selection and ordering, capacity-aware bin-packing with an overflow
//! allowance for lone oversized parties, multi-config allocation with
//! group-exclusive tables and remainder mixing, and pure seat/canvas
//! geometry. Persistence is a collaborator behind [`SeatingStore`]; every
//! allocation run commits or rolls back as one transaction.
//!
//! # Module structure
//!
//! ```text
//! seating-engine/src/
//! ├── core/          # Configuration, engine errors
//! ├── allocator/     # Selection, ordering, bin-packing, planning
//! ├── geometry/      # Seat positions, canvas grid layout
//! ├── store/         # Storage seam + in-memory implementation
//! ├── service.rs     # Transactional orchestration
//! └── utils/         # Logging bootstrap
//! ```

pub mod allocator;
pub mod core;
pub mod geometry;
pub mod service;
pub mod store;
pub mod utils;

// Re-export public surface
pub use crate::core::{AllocationError, AllocationResult, EngineConfig};
pub use allocator::{
    AllocationPlan, AllocationState, BinPackPolicy, DefaultLabels, GuestFilter, LabelLookup,
};
pub use service::{AllocationService, TableResize};
pub use store::{MemoryStore, SeatingStore, StoreError, StoreResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
