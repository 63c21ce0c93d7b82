//! Table and Seat Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// Table shape enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableShape {
    Circle,
    Rectangle,
    Square,
    Oval,
}

/// Default seat distribution hint
pub const DEFAULT_ARRANGEMENT: &str = "even";

/// Seat entity
///
/// Positions are relative to the table center and derived entirely from
/// the table's `(capacity, shape, arrangement, width, height)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: Uuid,
    pub table_id: Uuid,
    /// 1-based, unique within the table
    pub seat_number: u32,
    pub relative_x: f64,
    pub relative_y: f64,
    /// Facing direction in degrees, pointing inward toward the table center
    pub angle: f64,
    pub guest_id: Option<Uuid>,
}

/// Table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    /// Intended occupancy. Advisory: the allocator may exceed it for a
    /// single oversized party, surfaced as a warning, never an error.
    pub capacity: u32,
    pub shape: TableShape,
    pub seating_arrangement: String,
    pub width: f64,
    pub height: f64,
    /// Default on-screen position of the table center
    pub position_x: f64,
    pub position_y: f64,
    pub seats: Vec<Seat>,
    pub created_at: Timestamp,
}
