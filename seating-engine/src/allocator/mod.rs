//! Seating allocation pipeline
//!
//! Three composable stages, all pure:
//!
//! 1. **Selection & ordering** (`selector`): filter the event's guest list
//!    and produce the deterministic seating priority order.
//! 2. **Grouping & bin-packing** (`binpack`): partition ordered guests into
//!    table-sized bins with an explicit overflow-allowance policy.
//! 3. **Planning** (`plan`): turn bins and table configs into an
//!    [`AllocationPlan`] the service materializes inside one transaction.

pub mod binpack;
pub mod labels;
pub mod plan;
pub mod selector;

pub use binpack::{BinPackPolicy, BucketKey, PackOutcome, TableBin};
pub use labels::{DefaultLabels, LabelLookup};
pub use plan::{AllocationPlan, AllocationState, PlannedTable, TableFill};
pub use selector::{CategoryKey, GuestFilter};
