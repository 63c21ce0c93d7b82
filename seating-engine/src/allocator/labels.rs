//! Display labels for tables
//!
//! Group and side labels (and any translation of them) are a presentation
//! concern owned by the caller; the engine only ever goes through this
//! lookup when naming tables.

use super::binpack::BucketKey;

/// Caller-injected label translation
pub trait LabelLookup: Send + Sync {
    /// Display label for a raw group value
    fn group_label(&self, raw: &str) -> String {
        raw.to_string()
    }

    /// Display label for a raw side value
    fn side_label(&self, raw: &str) -> String {
        raw.to_string()
    }

    /// Label used for guests without a group
    fn missing_group_label(&self) -> String {
        "Unassigned".to_string()
    }
}

/// Pass-through labels
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl LabelLookup for DefaultLabels {}

/// Human-readable bucket label: group, or group + side
pub fn bucket_label(lookup: &dyn LabelLookup, bucket: &BucketKey) -> String {
    let group = match &bucket.group_name {
        Some(raw) => lookup.group_label(raw),
        None => lookup.missing_group_label(),
    };
    match &bucket.side {
        Some(raw) => format!("{} / {}", group, lookup.side_label(raw)),
        None => group,
    }
}
