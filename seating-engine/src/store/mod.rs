//! Storage seam
//!
//! The engine persists nothing itself; it talks to its collaborator
//! through [`SeatingStore`]. The contract is small: event-scoped lookups,
//! guest-level assignment upserts, and an atomic multi-statement layout
//! mutation with a configurable timeout budget. A failed mutation must
//! leave the previous state intact.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use shared::models::{Assignment, Guest, Seat, Table, TableShape};

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transaction timed out after {0} ms")]
    Timeout(u64),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Transaction options.
///
/// Allocation runs rewrite many rows and get a much larger budget than
/// single-row CRUD; see `EngineConfig::txn_timeout_ms`.
#[derive(Debug, Clone, Copy)]
pub struct TxnOptions {
    pub timeout_ms: u64,
}

impl Default for TxnOptions {
    fn default() -> Self {
        Self { timeout_ms: 5_000 }
    }
}

/// Bulk layout mutation, applied all-or-nothing
#[derive(Debug, Clone, Default)]
pub struct LayoutChange {
    /// Delete the event's current tables and assignments first
    pub clear_existing: bool,
    pub new_tables: Vec<Table>,
    /// Assignments into new and existing tables. Each one replaces any
    /// prior assignment held by the same guest.
    pub new_assignments: Vec<Assignment>,
}

/// Replacement layout for one table after a capacity/shape/size edit
#[derive(Debug, Clone)]
pub struct TableLayoutUpdate {
    pub capacity: u32,
    pub shape: TableShape,
    pub seating_arrangement: String,
    pub width: f64,
    pub height: f64,
    pub seats: Vec<Seat>,
}

/// Persistence collaborator contract
#[async_trait]
pub trait SeatingStore: Send + Sync {
    /// Guest list scoped to an event
    async fn guests_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Guest>>;

    /// Tables (with seats) scoped to an event, ordered by name
    async fn tables_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Table>>;

    /// Active assignments scoped to an event
    async fn assignments_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Assignment>>;

    /// Apply a layout change atomically: commit everything or nothing
    async fn apply_layout(
        &self,
        event_id: Uuid,
        txn: TxnOptions,
        change: LayoutChange,
    ) -> StoreResult<()>;

    /// Assign a guest to a table, replacing any existing assignment
    async fn upsert_assignment(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
        table_id: Uuid,
    ) -> StoreResult<Assignment>;

    /// Remove a guest's assignment; Ok(false) when none existed
    async fn remove_assignment(&self, event_id: Uuid, guest_id: Uuid) -> StoreResult<bool>;

    /// Replace a table's dimensions and full seat set
    async fn update_table_layout(
        &self,
        event_id: Uuid,
        table_id: Uuid,
        update: TableLayoutUpdate,
    ) -> StoreResult<()>;
}
