//! Response types for the shared crate

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of an allocation run.
///
/// `remaining_unseated > 0` is a partial-success notice for the caller,
/// not an error: `guests_seated + remaining_unseated` always equals the
/// size of the candidate pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllocationSummary {
    pub tables_created: u32,
    pub guests_seated: u32,
    pub remaining_unseated: u32,
}

/// Per-table occupancy snapshot for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableOccupancy {
    pub table_id: Uuid,
    pub table_name: String,
    pub capacity: u32,
    /// Seats consumed by current occupants (summed via seat demand)
    pub used: u32,
    /// Capacity exceeded; a warning for the caller, never an error
    pub over_capacity: bool,
}
