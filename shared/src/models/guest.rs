//! Guest Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Timestamp;

/// RSVP status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsvpStatus {
    Pending,
    Accepted,
    Declined,
}

impl RsvpStatus {
    /// Seating priority within a group/side bucket.
    ///
    /// Confirmed guests fill tables before uncertain ones, so a bucket that
    /// splits across tables strands the least likely attendees.
    pub fn priority(&self) -> u8 {
        match self {
            Self::Accepted => 0,
            Self::Pending => 1,
            Self::Declined => 2,
        }
    }
}

/// RSVP sub-record attached to a guest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rsvp {
    pub status: RsvpStatus,
    /// Confirmed party size (meaningful for ACCEPTED responses)
    pub guest_count: Option<u32>,
}

/// Guest entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    /// Which side the guest belongs to ("bride", "groom", "both", ...)
    pub side: Option<String>,
    /// Free-form grouping ("family", "friends", ...)
    pub group_name: Option<String>,
    /// Estimated party size before the RSVP arrives
    pub expected_guests: u32,
    pub rsvp: Option<Rsvp>,
    pub created_at: Timestamp,
}

impl Guest {
    /// RSVP status, treating a missing RSVP record as PENDING
    pub fn rsvp_status(&self) -> RsvpStatus {
        self.rsvp
            .as_ref()
            .map(|r| r.status)
            .unwrap_or(RsvpStatus::Pending)
    }

    /// Effective seat demand of this guest.
    ///
    /// DECLINED takes no seats. ACCEPTED takes the confirmed count
    /// (minimum 1 when unset or zero). PENDING and missing RSVPs take the
    /// pre-RSVP estimate (minimum 1). Every capacity computation in the
    /// engine sums seats through this function.
    pub fn seat_demand(&self) -> u32 {
        match &self.rsvp {
            Some(rsvp) => match rsvp.status {
                RsvpStatus::Declined => 0,
                RsvpStatus::Accepted => match rsvp.guest_count {
                    Some(count) if count > 0 => count,
                    _ => 1,
                },
                RsvpStatus::Pending => self.expected_guests.max(1),
            },
            None => self.expected_guests.max(1),
        }
    }
}
