//! Request types for the shared crate
//!
//! Allocation request payloads as they arrive from a caller.

use serde::{Deserialize, Serialize};

use crate::models::{GroupingStrategy, RsvpStatus, TableConfig, TableShape};

fn default_table_size() -> u32 {
    8
}

fn default_arrangement() -> String {
    crate::models::DEFAULT_ARRANGEMENT.to_string()
}

fn default_table_width() -> f64 {
    120.0
}

fn default_table_height() -> f64 {
    120.0
}

fn default_clear_existing() -> bool {
    true
}

/// Guest selection criteria shared by both allocation entry points.
///
/// Side and group match case-sensitively against the raw guest fields;
/// an absent filter means no restriction. A missing status list applies
/// the default of everything except DECLINED.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestSelection {
    pub side: Option<String>,
    pub group_name: Option<String>,
    pub include_rsvp_status: Option<Vec<RsvpStatus>>,
}

/// Single-strategy auto-arrangement request: uniform tables of one size
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrangeBySizeRequest {
    #[serde(default = "default_table_size")]
    pub table_size: u32,
    pub table_shape: TableShape,
    #[serde(default = "default_arrangement")]
    pub seating_arrangement: String,
    #[serde(default = "default_table_width")]
    pub table_width: f64,
    #[serde(default = "default_table_height")]
    pub table_height: f64,
    pub strategy: GroupingStrategy,
    #[serde(default)]
    pub selection: GuestSelection,
}

/// Multi-config auto-arrangement request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrangeWithConfigsRequest {
    pub configs: Vec<TableConfig>,
    /// Replace the event's current table set (destructive rebuild) instead
    /// of appending to the unassigned remainder
    #[serde(default = "default_clear_existing")]
    pub clear_existing: bool,
    /// After the config phases, top up every table's remaining capacity
    /// from the still-unseated pool
    #[serde(default)]
    pub mix_remaining: bool,
    #[serde(default)]
    pub selection: GuestSelection,
}
