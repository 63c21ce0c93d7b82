//! Allocation service
//!
//! Orchestration for an allocation run: validate the request, load the
//! event's records, run the pure planning pipeline, and apply the plan in
//! one store transaction. Also hosts the manual seat-level operations the
//! allocator composes with.
//!
//! Concurrency model: single-threaded, run-to-completion per invocation.
//! The service assumes at most one allocation in flight per event; callers
//! needing stronger guarantees must serialize (e.g. a per-event lock).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use shared::models::{Assignment, Table, TableShape};
use shared::request::{ArrangeBySizeRequest, ArrangeWithConfigsRequest};
use shared::response::{AllocationSummary, TableOccupancy};
use shared::types;

use crate::allocator::labels::{DefaultLabels, LabelLookup};
use crate::allocator::plan::{
    AllocationPlan, AllocationState, ConfigPlanContext, SingleStrategyOptions,
    plan_single_strategy, plan_with_configs,
};
use crate::allocator::selector::{GuestFilter, order_guests, select_guests};
use crate::core::{AllocationError, AllocationResult, EngineConfig};
use crate::geometry::{build_seats, grid_layout, regenerate_seats};
use crate::store::{LayoutChange, SeatingStore, StoreError, TableLayoutUpdate, TxnOptions};

/// New dimensions for a table whose seats are being regenerated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableResize {
    pub capacity: u32,
    pub shape: TableShape,
    pub seating_arrangement: String,
    pub width: f64,
    pub height: f64,
}

/// Seating allocation service
pub struct AllocationService {
    store: Arc<dyn SeatingStore>,
    labels: Arc<dyn LabelLookup>,
    config: EngineConfig,
}

impl AllocationService {
    pub fn new(store: Arc<dyn SeatingStore>, config: EngineConfig) -> Self {
        Self {
            store,
            labels: Arc::new(DefaultLabels),
            config,
        }
    }

    /// Replace the default pass-through labels with caller translations
    pub fn with_labels(mut self, labels: Arc<dyn LabelLookup>) -> Self {
        self.labels = labels;
        self
    }

    fn allocation_txn(&self) -> TxnOptions {
        TxnOptions {
            timeout_ms: self.config.txn_timeout_ms,
        }
    }

    /// Single-strategy auto-arrangement: uniform tables of one size,
    /// destructive rebuild of the event's table set.
    pub async fn arrange_by_size(
        &self,
        event_id: Uuid,
        request: &ArrangeBySizeRequest,
    ) -> AllocationResult<AllocationSummary> {
        if request.table_size == 0 {
            return Err(AllocationError::InvalidRequest(
                "Table size must be at least 1".to_string(),
            ));
        }
        if request.table_width <= 0.0 || request.table_height <= 0.0 {
            return Err(AllocationError::InvalidRequest(
                "Table dimensions must be greater than zero".to_string(),
            ));
        }

        let guests = self.store.guests_for_event(event_id).await?;
        let filter = GuestFilter::from_selection(&request.selection);
        let mut candidates = select_guests(&guests, &filter);
        if candidates.is_empty() {
            return Err(AllocationError::EmptySelection);
        }
        order_guests(&mut candidates);

        info!(
            event_id = %event_id,
            candidates = candidates.len(),
            table_size = request.table_size,
            strategy = ?request.strategy,
            "[Arrange] Single-strategy run starting"
        );

        let mut state = AllocationState::new();
        let options = SingleStrategyOptions {
            table_size: request.table_size,
            table_shape: request.table_shape,
            seating_arrangement: request.seating_arrangement.clone(),
            table_width: request.table_width,
            table_height: request.table_height,
            strategy: request.strategy,
            overflow_allowance: self.config.overflow_allowance,
        };
        let plan = plan_single_strategy(&candidates, &options, self.labels.as_ref(), &mut state);

        let summary = plan.summary.clone();
        let change = self.materialize(event_id, plan, true);
        self.store
            .apply_layout(event_id, self.allocation_txn(), change)
            .await?;

        self.report(event_id, &summary);
        Ok(summary)
    }

    /// Multi-config auto-arrangement: group-exclusive configs, reserved
    /// blank tables, optional remainder mixing, destructive or incremental.
    pub async fn arrange_with_configs(
        &self,
        event_id: Uuid,
        request: &ArrangeWithConfigsRequest,
    ) -> AllocationResult<AllocationSummary> {
        if request.configs.is_empty() {
            return Err(AllocationError::InvalidRequest(
                "At least one table config is required".to_string(),
            ));
        }
        for config in &request.configs {
            config.validate()?;
        }

        let all_guests = self.store.guests_for_event(event_id).await?;
        let existing_tables = self.store.tables_for_event(event_id).await?;
        let existing_assignments = self.store.assignments_for_event(event_id).await?;

        let filter = GuestFilter::from_selection(&request.selection);
        let mut candidates = select_guests(&all_guests, &filter);
        if candidates.is_empty() {
            return Err(AllocationError::EmptySelection);
        }

        if !request.clear_existing {
            // Incremental mode: whoever already holds an assignment is out
            // of the candidate pool
            let assigned: HashSet<Uuid> =
                existing_assignments.iter().map(|a| a.guest_id).collect();
            candidates.retain(|g| !assigned.contains(&g.id));
            if candidates.is_empty() {
                return Err(AllocationError::AllGuestsSeated);
            }
        }
        order_guests(&mut candidates);

        let (tables_for_plan, assignments_for_plan) = if request.clear_existing {
            (Vec::new(), Vec::new())
        } else {
            (existing_tables, existing_assignments)
        };

        info!(
            event_id = %event_id,
            candidates = candidates.len(),
            configs = request.configs.len(),
            clear_existing = request.clear_existing,
            mix_remaining = request.mix_remaining,
            "[Arrange] Multi-config run starting"
        );

        let mut state = AllocationState::starting_after(tables_for_plan.len());
        let context = ConfigPlanContext {
            configs: &request.configs,
            existing_tables: &tables_for_plan,
            existing_assignments: &assignments_for_plan,
            all_guests: &all_guests,
            mix_remaining: request.mix_remaining,
        };
        let plan = plan_with_configs(
            &candidates,
            context,
            &self.config,
            self.labels.as_ref(),
            &mut state,
        );

        let summary = plan.summary.clone();
        let change = self.materialize(event_id, plan, request.clear_existing);
        self.store
            .apply_layout(event_id, self.allocation_txn(), change)
            .await?;

        self.report(event_id, &summary);
        Ok(summary)
    }

    fn report(&self, event_id: Uuid, summary: &AllocationSummary) {
        if summary.remaining_unseated > 0 {
            // Partial success is a notice for the caller, not an error
            warn!(
                event_id = %event_id,
                remaining = summary.remaining_unseated,
                "[Arrange] Guests left unseated"
            );
        }
        info!(
            event_id = %event_id,
            tables = summary.tables_created,
            seated = summary.guests_seated,
            "[Arrange] Allocation committed"
        );
    }

    /// Turn a plan into concrete Table/Seat/Assignment records, with grid
    /// positions for the new tables
    fn materialize(
        &self,
        event_id: Uuid,
        plan: AllocationPlan,
        clear_existing: bool,
    ) -> LayoutChange {
        let max_width = plan
            .new_tables
            .iter()
            .map(|t| t.width)
            .fold(1.0f64, f64::max);
        let max_height = plan
            .new_tables
            .iter()
            .map(|t| t.height)
            .fold(1.0f64, f64::max);
        let layout = grid_layout(
            plan.new_tables.len() as u32,
            max_width,
            max_height,
            &self.config,
        );

        let now = types::now();
        let mut change = LayoutChange {
            clear_existing,
            ..LayoutChange::default()
        };

        for (index, planned) in plan.new_tables.into_iter().enumerate() {
            let table_id = Uuid::new_v4();
            let (position_x, position_y) = layout.position(index as u32);
            let seats = build_seats(
                table_id,
                planned.capacity,
                planned.shape,
                &planned.seating_arrangement,
                planned.width,
                planned.height,
            );
            for guest in &planned.guests {
                change.new_assignments.push(Assignment {
                    id: Uuid::new_v4(),
                    event_id,
                    guest_id: guest.id,
                    table_id,
                    created_at: now,
                });
            }
            change.new_tables.push(Table {
                id: table_id,
                event_id,
                name: planned.name,
                capacity: planned.capacity,
                shape: planned.shape,
                seating_arrangement: planned.seating_arrangement,
                width: planned.width,
                height: planned.height,
                position_x,
                position_y,
                seats,
                created_at: now,
            });
        }

        for fill in plan.fills {
            for guest in &fill.guests {
                change.new_assignments.push(Assignment {
                    id: Uuid::new_v4(),
                    event_id,
                    guest_id: guest.id,
                    table_id: fill.table_id,
                    created_at: now,
                });
            }
        }

        change
    }

    // ========== Manual seat-level operations ==========

    /// Assign a guest to a table, replacing any prior assignment
    pub async fn assign_guest(
        &self,
        event_id: Uuid,
        guest_id: Uuid,
        table_id: Uuid,
    ) -> AllocationResult<Assignment> {
        self.store
            .upsert_assignment(event_id, guest_id, table_id)
            .await
            .map_err(map_store_err)
    }

    /// Remove a guest's assignment; Ok(false) when there was none
    pub async fn unassign_guest(&self, event_id: Uuid, guest_id: Uuid) -> AllocationResult<bool> {
        self.store
            .remove_assignment(event_id, guest_id)
            .await
            .map_err(map_store_err)
    }

    /// Regenerate a table's seat geometry after a capacity/shape/size
    /// edit, preserving guest-to-seat bindings by seat number
    pub async fn regenerate_table_seats(
        &self,
        event_id: Uuid,
        table_id: Uuid,
        resize: TableResize,
    ) -> AllocationResult<()> {
        if resize.capacity == 0 {
            return Err(AllocationError::InvalidRequest(
                "Table capacity must be at least 1".to_string(),
            ));
        }
        let tables = self.store.tables_for_event(event_id).await?;
        let table = tables
            .into_iter()
            .find(|t| t.id == table_id)
            .ok_or_else(|| AllocationError::NotFound(format!("Table {}", table_id)))?;

        let seats = regenerate_seats(
            table_id,
            resize.capacity,
            resize.shape,
            &resize.seating_arrangement,
            resize.width,
            resize.height,
            &table.seats,
        );
        self.store
            .update_table_layout(
                event_id,
                table_id,
                TableLayoutUpdate {
                    capacity: resize.capacity,
                    shape: resize.shape,
                    seating_arrangement: resize.seating_arrangement,
                    width: resize.width,
                    height: resize.height,
                    seats,
                },
            )
            .await
            .map_err(map_store_err)
    }

    /// Per-table occupancy snapshot for the caller's UI
    pub async fn occupancy(&self, event_id: Uuid) -> AllocationResult<Vec<TableOccupancy>> {
        let guests = self.store.guests_for_event(event_id).await?;
        let tables = self.store.tables_for_event(event_id).await?;
        let assignments = self.store.assignments_for_event(event_id).await?;

        let demand: HashMap<Uuid, u32> =
            guests.iter().map(|g| (g.id, g.seat_demand())).collect();

        Ok(tables
            .iter()
            .map(|table| {
                let used: u32 = assignments
                    .iter()
                    .filter(|a| a.table_id == table.id)
                    .map(|a| demand.get(&a.guest_id).copied().unwrap_or(1))
                    .sum();
                TableOccupancy {
                    table_id: table.id,
                    table_name: table.name.clone(),
                    capacity: table.capacity,
                    used,
                    over_capacity: used > table.capacity,
                }
            })
            .collect())
    }
}

fn map_store_err(err: StoreError) -> AllocationError {
    match err {
        StoreError::NotFound(resource) => AllocationError::NotFound(resource),
        other => AllocationError::Store(other),
    }
}
