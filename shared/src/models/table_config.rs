//! Table Config Model
//!
//! Allocation-time descriptors. These arrive with the request and are
//! never persisted; the engine materializes Tables from them.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::table::TableShape;

/// Grouping strategy for single-strategy auto-arrangement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GroupingStrategy {
    /// Bucket guests by group name alone
    GroupOnly,
    /// Bucket guests by group name + side composite key
    SideThenGroup,
}

/// Request-time descriptor of how many tables of a given shape/size to
/// create, optionally dedicated to specific groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub shape: TableShape,
    pub capacity: u32,
    pub count: u32,
    pub width: f64,
    pub height: f64,
    /// Non-empty: tables of this config are reserved for the named groups
    /// and never mix guests across groups. Empty: tables are created blank.
    #[serde(default)]
    pub group_assignments: Vec<String>,
}

impl TableConfig {
    /// Whether this config dedicates its tables to specific groups
    pub fn is_group_exclusive(&self) -> bool {
        !self.group_assignments.is_empty()
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.capacity == 0 {
            return Err(AppError::validation("Table capacity must be at least 1"));
        }
        if self.count == 0 {
            return Err(AppError::validation("Table count must be at least 1"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(AppError::validation(
                "Table dimensions must be greater than zero",
            ));
        }
        Ok(())
    }
}
