//! Allocation planning
//!
//! Pure planning for both allocation variants. Running state (the table
//! counter and the seated-guest set) is threaded through the phases as an
//! explicit [`AllocationState`] value, never a module-level mutable, so
//! phases compose and test in isolation. The service materializes the
//! resulting plan inside one store transaction.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use uuid::Uuid;

use shared::models::{Assignment, Guest, GroupingStrategy, Table, TableConfig, TableShape};
use shared::response::AllocationSummary;

use super::binpack::{self, BinPackPolicy, BucketKey, TableBin};
use super::labels::{LabelLookup, bucket_label};
use crate::core::EngineConfig;

/// Running allocation state threaded through the phases
#[derive(Debug, Default)]
pub struct AllocationState {
    next_table_number: u32,
    seated: HashSet<Uuid>,
}

impl AllocationState {
    /// Fresh state numbering tables from 1
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// State whose table numbering continues after `existing_tables`
    /// already in the event (incremental mode)
    pub fn starting_after(existing_tables: usize) -> Self {
        Self {
            next_table_number: existing_tables as u32,
            seated: HashSet::new(),
        }
    }

    /// Claim the next table number (1-based)
    pub fn next_table_number(&mut self) -> u32 {
        self.next_table_number += 1;
        self.next_table_number
    }

    pub fn mark_seated<'a>(&mut self, guests: impl IntoIterator<Item = &'a Guest>) {
        self.seated.extend(guests.into_iter().map(|g| g.id));
    }

    pub fn is_seated(&self, guest_id: Uuid) -> bool {
        self.seated.contains(&guest_id)
    }

    pub fn seated_count(&self) -> u32 {
        self.seated.len() as u32
    }
}

/// A table the plan will create, with its guests in seating order
#[derive(Debug, Clone)]
pub struct PlannedTable {
    pub name: String,
    pub capacity: u32,
    pub shape: TableShape,
    pub seating_arrangement: String,
    pub width: f64,
    pub height: f64,
    pub guests: Vec<Guest>,
    pub seats_used: u32,
}

/// Guests to add to a pre-existing table (remainder mixing)
#[derive(Debug, Clone)]
pub struct TableFill {
    pub table_id: Uuid,
    pub guests: Vec<Guest>,
}

/// Output of a planning run
#[derive(Debug, Clone, Default)]
pub struct AllocationPlan {
    pub new_tables: Vec<PlannedTable>,
    pub fills: Vec<TableFill>,
    pub summary: AllocationSummary,
}

/// Options for the single-strategy variant (uniform tables of one size)
#[derive(Debug, Clone)]
pub struct SingleStrategyOptions {
    pub table_size: u32,
    pub table_shape: TableShape,
    pub seating_arrangement: String,
    pub table_width: f64,
    pub table_height: f64,
    pub strategy: GroupingStrategy,
    pub overflow_allowance: bool,
}

/// Inputs to the multi-config variant
#[derive(Debug, Clone, Copy)]
pub struct ConfigPlanContext<'a> {
    pub configs: &'a [TableConfig],
    /// Tables already in the event (empty on a destructive rebuild)
    pub existing_tables: &'a [Table],
    pub existing_assignments: &'a [Assignment],
    /// Full event guest list, for demand lookups of current occupants
    pub all_guests: &'a [Guest],
    pub mix_remaining: bool,
}

fn planned_from_bin(
    bin: TableBin,
    capacity: u32,
    shape: TableShape,
    arrangement: &str,
    width: f64,
    height: f64,
    labels: &dyn LabelLookup,
    state: &mut AllocationState,
) -> PlannedTable {
    let number = state.next_table_number();
    PlannedTable {
        name: format!("Table {} - {}", number, bucket_label(labels, &bin.bucket)),
        capacity,
        shape,
        seating_arrangement: arrangement.to_string(),
        width,
        height,
        seats_used: bin.seats_used,
        guests: bin.guests,
    }
}

/// Plan a single-strategy run: bucket, pack, and name one table per bin.
///
/// Always a full rebuild; the service clears the previous table set in
/// the same transaction that creates this plan's tables.
pub fn plan_single_strategy(
    ordered: &[Guest],
    opts: &SingleStrategyOptions,
    labels: &dyn LabelLookup,
    state: &mut AllocationState,
) -> AllocationPlan {
    let policy = BinPackPolicy {
        table_size: opts.table_size,
        overflow_allowance: opts.overflow_allowance,
    };
    let outcome = binpack::pack_guests(ordered, opts.strategy, &policy);

    let mut plan = AllocationPlan::default();
    for bin in outcome.bins {
        state.mark_seated(&bin.guests);
        plan.new_tables.push(planned_from_bin(
            bin,
            opts.table_size,
            opts.table_shape,
            &opts.seating_arrangement,
            opts.table_width,
            opts.table_height,
            labels,
            state,
        ));
    }

    plan.summary = AllocationSummary {
        tables_created: plan.new_tables.len() as u32,
        guests_seated: state.seated_count(),
        remaining_unseated: outcome.unplaced.len() as u32,
    };
    plan
}

/// Plan a multi-config run: group-exclusive configs, open configs, then
/// optional remainder mixing over every table in the event.
pub fn plan_with_configs(
    candidates: &[Guest],
    ctx: ConfigPlanContext<'_>,
    engine: &EngineConfig,
    labels: &dyn LabelLookup,
    state: &mut AllocationState,
) -> AllocationPlan {
    let mut plan = AllocationPlan::default();

    // Phase 1: group-exclusive configs
    for config in ctx.configs.iter().filter(|c| c.is_group_exclusive()) {
        phase_group_exclusive(candidates, config, engine, labels, state, &mut plan.new_tables);
    }

    // Phase 2: open configs become reserved blank tables
    for config in ctx.configs.iter().filter(|c| !c.is_group_exclusive()) {
        for _ in 0..config.count {
            let number = state.next_table_number();
            plan.new_tables.push(PlannedTable {
                name: format!("Table {}", number),
                capacity: config.capacity,
                shape: config.shape,
                seating_arrangement: shared::models::DEFAULT_ARRANGEMENT.to_string(),
                width: config.width,
                height: config.height,
                guests: Vec::new(),
                seats_used: 0,
            });
        }
    }

    // Phase 3: top up remaining capacity from the unseated pool
    if ctx.mix_remaining {
        phase_mix_remaining(candidates, &ctx, engine, state, &mut plan);
    }

    let seated = state.seated_count();
    plan.summary = AllocationSummary {
        tables_created: plan.new_tables.len() as u32,
        guests_seated: seated,
        remaining_unseated: candidates.len() as u32 - seated,
    };
    plan
}

/// Phase 1: allocate a config's table budget across its named groups with
/// a two-pass fair share, then fill each group's tables with only that
/// group's guests.
fn phase_group_exclusive(
    candidates: &[Guest],
    config: &TableConfig,
    engine: &EngineConfig,
    labels: &dyn LabelLookup,
    state: &mut AllocationState,
    out: &mut Vec<PlannedTable>,
) {
    let mut budget = config.count;

    // Remaining unseated guests per named group, preserving global order
    let groups: Vec<(String, Vec<Guest>)> = config
        .group_assignments
        .iter()
        .map(|name| {
            let members: Vec<Guest> = candidates
                .iter()
                .filter(|g| {
                    !state.is_seated(g.id) && g.group_name.as_deref() == Some(name.as_str())
                })
                .cloned()
                .collect();
            (name.clone(), members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect();

    if groups.is_empty() {
        return;
    }

    let seats_needed: Vec<u32> = groups
        .iter()
        .map(|(_, members)| members.iter().map(Guest::seat_demand).sum())
        .collect();

    // Pass A: every group with guests gets one table while the budget lasts
    let mut allocated = vec![0u32; groups.len()];
    for slot in allocated.iter_mut() {
        if budget == 0 {
            break;
        }
        *slot = 1;
        budget -= 1;
    }

    // Pass B: round-robin extra tables to groups still short on capacity
    while budget > 0 {
        let mut granted = false;
        for (i, slot) in allocated.iter_mut().enumerate() {
            if budget == 0 {
                break;
            }
            if *slot * config.capacity < seats_needed[i] {
                *slot += 1;
                budget -= 1;
                granted = true;
            }
        }
        if !granted {
            break;
        }
    }

    debug!(
        capacity = config.capacity,
        budget = config.count,
        groups = groups.len(),
        "[Allocator] Group-exclusive fair share computed"
    );

    for (i, (group_name, members)) in groups.into_iter().enumerate() {
        if allocated[i] == 0 {
            continue;
        }
        let bucket = BucketKey {
            group_name: Some(group_name),
            side: None,
        };
        let outcome = binpack::pack_bucket(
            bucket,
            members,
            &BinPackPolicy {
                table_size: config.capacity,
                overflow_allowance: engine.overflow_allowance,
            },
        );
        // Bins beyond the group's allocation stay unseated; the mixing
        // phase may still pick those guests up
        for bin in outcome.bins.into_iter().take(allocated[i] as usize) {
            state.mark_seated(&bin.guests);
            out.push(planned_from_bin(
                bin,
                config.capacity,
                config.shape,
                shared::models::DEFAULT_ARRANGEMENT,
                config.width,
                config.height,
                labels,
                state,
            ));
        }
    }
}

/// Phase 3: walk every table in the event (pre-existing first, then the
/// newly planned ones) and fill its remaining capacity from the unseated
/// pool in global order, using the same bin-fill rule per table.
fn phase_mix_remaining(
    candidates: &[Guest],
    ctx: &ConfigPlanContext<'_>,
    engine: &EngineConfig,
    state: &mut AllocationState,
    plan: &mut AllocationPlan,
) {
    // Demand lookup for current occupants: candidates and the full guest
    // list both feed it; anyone outside both counts as demand 1
    let mut demand_index: HashMap<Uuid, u32> = HashMap::new();
    for guest in ctx.all_guests.iter().chain(candidates.iter()) {
        demand_index.insert(guest.id, guest.seat_demand());
    }

    let remaining: Vec<Guest> = candidates
        .iter()
        .filter(|g| !state.is_seated(g.id))
        .cloned()
        .collect();
    let mut cursor = 0usize;

    for table in ctx.existing_tables {
        if cursor >= remaining.len() {
            break;
        }
        let occupants: Vec<Uuid> = ctx
            .existing_assignments
            .iter()
            .filter(|a| a.table_id == table.id)
            .map(|a| a.guest_id)
            .collect();
        let mut used: u32 = occupants
            .iter()
            .map(|id| demand_index.get(id).copied().unwrap_or(1))
            .sum();
        let mut occupied = !occupants.is_empty();

        let mut fill = Vec::new();
        while let Some(guest) = remaining.get(cursor) {
            let demand = guest.seat_demand();
            if used + demand <= table.capacity || (!occupied && engine.overflow_allowance) {
                used += demand;
                occupied = true;
                fill.push(guest.clone());
                cursor += 1;
            } else {
                break;
            }
        }
        if !fill.is_empty() {
            debug!(
                table = %table.name,
                added = fill.len(),
                used,
                capacity = table.capacity,
                "[Allocator] Mixed remainder into existing table"
            );
            state.mark_seated(&fill);
            plan.fills.push(TableFill {
                table_id: table.id,
                guests: fill,
            });
        }
    }

    for table in plan.new_tables.iter_mut() {
        if cursor >= remaining.len() {
            break;
        }
        let mut occupied = !table.guests.is_empty();
        while let Some(guest) = remaining.get(cursor) {
            let demand = guest.seat_demand();
            if table.seats_used + demand <= table.capacity
                || (!occupied && engine.overflow_allowance)
            {
                table.seats_used += demand;
                occupied = true;
                state.mark_seated([guest]);
                table.guests.push(guest.clone());
                cursor += 1;
            } else {
                break;
            }
        }
    }
}
