//! Itinerary item model.

use jiff::{civil::Time, Timestamp};
use serde::{Deserialize, Serialize};

use super::TransportMode;
use crate::rank::Rank;

/// A place scheduled on a specific day of a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier for the item
    pub id: u64,

    /// ID of the day the item belongs to
    pub day_id: u64,

    /// ID of the scheduled place
    pub place_id: u64,

    /// Position within the day; ascending rank is display order
    pub rank: Rank,

    /// Planned arrival time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<Time>,

    /// Planned time spent at the place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// How the traveller gets to the next item of the same day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_to_next: Option<TransportMode>,

    /// Travel time to the next item of the same day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_duration_minutes: Option<u32>,

    pub created_at: Timestamp,

    pub updated_at: Timestamp,
}

impl Item {
    /// True when the item carries a link to the following item.
    pub fn has_transport_link(&self) -> bool {
        self.transport_to_next.is_some() || self.transport_duration_minutes.is_some()
    }
}
