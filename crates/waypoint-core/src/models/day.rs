//! Day model definition.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::Item;

/// One calendar day of a trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Day {
    /// Unique identifier for the day
    pub id: u64,

    /// ID of the parent trip
    pub trip_id: u64,

    /// 1-based position of the day within its trip.
    ///
    /// Dense and unique per trip at rest. Only a renumbering unit of work
    /// ever observes placeholder values outside `1..=N`.
    pub day_number: i64,

    /// Calendar date, when the trip is anchored to dates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Items ordered by rank (loaded with trip details)
    #[serde(default)]
    pub items: Vec<Item>,
}
