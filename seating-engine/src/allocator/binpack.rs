//! Capacity-aware grouping and bin-packing
//!
//! Partitions an ordered guest list into buckets and walks each bucket
//! greedily, accumulating seat demand into table-sized bins. The walk is
//! deterministic: guests arrive already sorted, and buckets are formed in
//! a single pass over consecutive runs, never re-sorted.

use shared::models::{GroupingStrategy, Guest};

use super::selector::CategoryKey;

/// Identity of a packing bucket.
///
/// Holds the raw field values of the bucket's first guest so table naming
/// can go through the label lookup with the original spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketKey {
    pub group_name: Option<String>,
    pub side: Option<String>,
}

/// Packing policy for one run
#[derive(Debug, Clone, Copy)]
pub struct BinPackPolicy {
    /// Target capacity per table
    pub table_size: u32,
    /// An empty table always admits the next guest, so a single party
    /// larger than the table size is never stranded
    pub overflow_allowance: bool,
}

/// One planned table's worth of guests
#[derive(Debug, Clone)]
pub struct TableBin {
    pub bucket: BucketKey,
    pub guests: Vec<Guest>,
    /// Summed seat demand of the bin's guests
    pub seats_used: u32,
}

/// Result of a packing pass.
///
/// `unplaced` is only ever populated with the overflow allowance disabled:
/// parties whose own demand exceeds the table size then have no admissible
/// table.
#[derive(Debug, Clone, Default)]
pub struct PackOutcome {
    pub bins: Vec<TableBin>,
    pub unplaced: Vec<Guest>,
}

impl PackOutcome {
    fn absorb(&mut self, mut other: PackOutcome) {
        self.bins.append(&mut other.bins);
        self.unplaced.append(&mut other.unplaced);
    }
}

/// Partition ordered guests into buckets in one pass.
///
/// Guests are sorted by group then side, so guests sharing a bucket key
/// are always contiguous.
pub fn group_buckets(ordered: &[Guest], strategy: GroupingStrategy) -> Vec<(BucketKey, Vec<Guest>)> {
    let mut buckets: Vec<(BucketKey, Vec<Guest>)> = Vec::new();
    let mut current_key: Option<(CategoryKey, Option<CategoryKey>)> = None;

    for guest in ordered {
        let group_key = CategoryKey::of(guest.group_name.as_deref());
        let side_key = match strategy {
            GroupingStrategy::GroupOnly => None,
            GroupingStrategy::SideThenGroup => Some(CategoryKey::of(guest.side.as_deref())),
        };
        let key = (group_key, side_key);

        if current_key.as_ref() != Some(&key) {
            current_key = Some(key);
            buckets.push((
                BucketKey {
                    group_name: guest.group_name.clone(),
                    side: match strategy {
                        GroupingStrategy::GroupOnly => None,
                        GroupingStrategy::SideThenGroup => guest.side.clone(),
                    },
                },
                vec![guest.clone()],
            ));
        } else if let Some((_, bucket)) = buckets.last_mut() {
            bucket.push(guest.clone());
        }
    }

    buckets
}

/// Greedily pack one bucket into table-sized bins.
///
/// A guest joins the in-progress bin when its demand still fits, or when
/// the bin is empty and the overflow allowance applies. Otherwise the bin
/// is closed and a new one starts with that guest.
pub fn pack_bucket(bucket: BucketKey, guests: Vec<Guest>, policy: &BinPackPolicy) -> PackOutcome {
    let mut outcome = PackOutcome::default();
    let mut current: Vec<Guest> = Vec::new();
    let mut seats_used = 0u32;

    for guest in guests {
        let demand = guest.seat_demand();

        if seats_used + demand <= policy.table_size
            || (current.is_empty() && policy.overflow_allowance)
        {
            seats_used += demand;
            current.push(guest);
            continue;
        }

        if current.is_empty() {
            // Allowance disabled and the party alone exceeds the table
            outcome.unplaced.push(guest);
            continue;
        }

        outcome.bins.push(TableBin {
            bucket: bucket.clone(),
            guests: std::mem::take(&mut current),
            seats_used,
        });

        if demand <= policy.table_size || policy.overflow_allowance {
            seats_used = demand;
            current.push(guest);
        } else {
            seats_used = 0;
            outcome.unplaced.push(guest);
        }
    }

    if !current.is_empty() {
        outcome.bins.push(TableBin {
            bucket,
            guests: current,
            seats_used,
        });
    }

    outcome
}

/// Bucket and pack a whole ordered guest list
pub fn pack_guests(
    ordered: &[Guest],
    strategy: GroupingStrategy,
    policy: &BinPackPolicy,
) -> PackOutcome {
    let mut outcome = PackOutcome::default();
    for (bucket, guests) in group_buckets(ordered, strategy) {
        outcome.absorb(pack_bucket(bucket, guests, policy));
    }
    outcome
}
