//! In-memory store
//!
//! Reference implementation of [`SeatingStore`] backed by a process-local
//! map. Layout mutations take a snapshot of the event's records first and
//! restore it on any failure, matching the all-or-nothing contract real
//! backends provide with a transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use shared::models::{Assignment, Guest, Table};
use shared::types;

use super::{LayoutChange, SeatingStore, StoreError, StoreResult, TableLayoutUpdate, TxnOptions};

#[derive(Debug, Clone, Default)]
struct EventRecords {
    guests: Vec<Guest>,
    tables: Vec<Table>,
    assignments: Vec<Assignment>,
}

/// Process-local [`SeatingStore`]
#[derive(Default)]
pub struct MemoryStore {
    events: RwLock<HashMap<Uuid, EventRecords>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Seeding helpers ==========

    pub fn insert_guest(&self, guest: Guest) {
        self.events
            .write()
            .entry(guest.event_id)
            .or_default()
            .guests
            .push(guest);
    }

    pub fn insert_table(&self, table: Table) {
        self.events
            .write()
            .entry(table.event_id)
            .or_default()
            .tables
            .push(table);
    }

    pub fn insert_assignment(&self, assignment: Assignment) {
        self.events
            .write()
            .entry(assignment.event_id)
            .or_default()
            .assignments
            .push(assignment);
    }

    fn validate_change(records: &EventRecords, change: &LayoutChange) -> StoreResult<()> {
        for assignment in &change.new_assignments {
            if !records.guests.iter().any(|g| g.id == assignment.guest_id) {
                return Err(StoreError::NotFound(format!(
                    "Guest {} referenced by assignment",
                    assignment.guest_id
                )));
            }
            let in_new = change.new_tables.iter().any(|t| t.id == assignment.table_id);
            let in_existing = records.tables.iter().any(|t| t.id == assignment.table_id);
            if !in_new && !in_existing {
                return Err(StoreError::NotFound(format!(
                    "Table {} referenced by assignment",
                    assignment.table_id
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl SeatingStore for MemoryStore {
    async fn guests_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Guest>> {
        Ok(self
            .events
            .read()
            .get(&event_id)
            .map(|r| r.guests.clone())
            .unwrap_or_default())
    }

    async fn tables_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Table>> {
        let mut tables = self
            .events
            .read()
            .get(&event_id)
            .map(|r| r.tables.clone())
            .unwrap_or_default();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tables)
    }

    async fn assignments_for_event(&self, event_id: Uuid) -> StoreResult<Vec<Assignment>> {
        Ok(self
            .events
            .read()
            .get(&event_id)
            .map(|r| r.assignments.clone())
            .unwrap_or_default())
    }

    async fn apply_layout(
        &self,
        event_id: Uuid,
        _txn: TxnOptions,
        change: LayoutChange,
    ) -> StoreResult<()> {
        let mut events = self.events.write();
        let records = events.entry(event_id).or_default();
        let snapshot = records.clone();

        if change.clear_existing {
            records.tables.clear();
            records.assignments.clear();
        }

        if let Err(err) = Self::validate_change(records, &change) {
            *records = snapshot;
            return Err(err);
        }

        records.tables.extend(change.new_tables);
        for assignment in change.new_assignments {
            records
                .assignments
                .retain(|a| a.guest_id != assignment.guest_id);
            records.assignments.push(assignment);
        }
        Ok(())
    }

    async fn upsert_assignment(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
        table_id: Uuid,
    ) -> StoreResult<Assignment> {
        let mut events = self.events.write();
        let records = events
            .get_mut(&event_id)
            .ok_or_else(|| StoreError::NotFound(format!("Event {}", event_id)))?;

        if !records.guests.iter().any(|g| g.id == guest_id) {
            return Err(StoreError::NotFound(format!("Guest {}", guest_id)));
        }
        if !records.tables.iter().any(|t| t.id == table_id) {
            return Err(StoreError::NotFound(format!("Table {}", table_id)));
        }

        records.assignments.retain(|a| a.guest_id != guest_id);
        let assignment = Assignment {
            id: Uuid::new_v4(),
            event_id,
            guest_id,
            table_id,
            created_at: types::now(),
        };
        records.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn remove_assignment(&self, event_id: Uuid, guest_id: Uuid) -> StoreResult<bool> {
        let mut events = self.events.write();
        let records = events
            .get_mut(&event_id)
            .ok_or_else(|| StoreError::NotFound(format!("Event {}", event_id)))?;
        let before = records.assignments.len();
        records.assignments.retain(|a| a.guest_id != guest_id);
        Ok(records.assignments.len() < before)
    }

    async fn update_table_layout(
        &self,
        event_id: Uuid,
        table_id: Uuid,
        update: TableLayoutUpdate,
    ) -> StoreResult<()> {
        let mut events = self.events.write();
        let records = events
            .get_mut(&event_id)
            .ok_or_else(|| StoreError::NotFound(format!("Event {}", event_id)))?;
        let table = records
            .tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or_else(|| StoreError::NotFound(format!("Table {}", table_id)))?;

        table.capacity = update.capacity;
        table.shape = update.shape;
        table.seating_arrangement = update.seating_arrangement;
        table.width = update.width;
        table.height = update.height;
        table.seats = update.seats;
        Ok(())
    }
}
