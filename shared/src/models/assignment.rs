//! Assignment Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// Guest-to-table link
///
/// Many-to-one with Table, functionally one-to-one with Guest: a guest
/// holds at most one active assignment, so creating a new one must first
/// remove any existing assignment for that guest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub event_id: Uuid,
    pub guest_id: Uuid,
    pub table_id: Uuid,
    pub created_at: Timestamp,
}
