//! Guest selection and ordering
//!
//! Filters an event's guest list and produces the total order the
//! bin-packer consumes: group → side → RSVP priority → name.

use shared::models::{Guest, RsvpStatus};
use shared::request::GuestSelection;

/// Sort key for the free-form category fields (side, group).
///
/// Named values compare case-insensitively; a missing value sorts after
/// every named value, so "no group" never interleaves with real groups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryKey {
    Named(String),
    Missing,
}

impl CategoryKey {
    pub fn of(value: Option<&str>) -> Self {
        match value {
            Some(v) => Self::Named(v.to_lowercase()),
            None => Self::Missing,
        }
    }
}

/// Guest selection criteria
#[derive(Debug, Clone)]
pub struct GuestFilter {
    /// Case-sensitive exact match on the raw side field
    pub side: Option<String>,
    /// Case-sensitive exact match on the raw group field
    pub group_name: Option<String>,
    pub include_rsvp_status: Vec<RsvpStatus>,
}

impl Default for GuestFilter {
    /// Default selection: everything except DECLINED
    fn default() -> Self {
        Self {
            side: None,
            group_name: None,
            include_rsvp_status: vec![RsvpStatus::Accepted, RsvpStatus::Pending],
        }
    }
}

impl GuestFilter {
    /// Resolve a request's selection criteria, applying the default
    /// status set when the caller left it unspecified
    pub fn from_selection(selection: &GuestSelection) -> Self {
        let defaults = Self::default();
        Self {
            side: selection.side.clone(),
            group_name: selection.group_name.clone(),
            include_rsvp_status: selection
                .include_rsvp_status
                .clone()
                .unwrap_or(defaults.include_rsvp_status),
        }
    }

    pub fn matches(&self, guest: &Guest) -> bool {
        if !self.include_rsvp_status.contains(&guest.rsvp_status()) {
            return false;
        }
        if let Some(side) = &self.side
            && guest.side.as_deref() != Some(side.as_str())
        {
            return false;
        }
        if let Some(group) = &self.group_name
            && guest.group_name.as_deref() != Some(group.as_str())
        {
            return false;
        }
        true
    }
}

/// Filter an event's guest list
pub fn select_guests(guests: &[Guest], filter: &GuestFilter) -> Vec<Guest> {
    guests.iter().filter(|g| filter.matches(g)).cloned().collect()
}

/// Sort guests into seating priority order (stable, deterministic).
///
/// Keys in sequence: group (missing last) → side (missing last) → RSVP
/// priority (confirmed first) → name. When a table-size constraint later
/// splits a bucket across tables, the guests most likely to attend are
/// filled in first.
pub fn order_guests(guests: &mut [Guest]) {
    guests.sort_by(|a, b| {
        CategoryKey::of(a.group_name.as_deref())
            .cmp(&CategoryKey::of(b.group_name.as_deref()))
            .then_with(|| {
                CategoryKey::of(a.side.as_deref()).cmp(&CategoryKey::of(b.side.as_deref()))
            })
            .then_with(|| a.rsvp_status().priority().cmp(&b.rsvp_status().priority()))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });
}
