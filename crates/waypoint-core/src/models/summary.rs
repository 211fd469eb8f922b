//! Trip summary types.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Trip;

/// Summary information about a trip with day and item counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripSummary {
    pub id: u64,
    pub name: String,
    pub destination: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub archived: bool,
    pub created_at: Timestamp,
    /// Number of days in the trip
    pub total_days: u32,
    /// Number of scheduled items across all days
    pub total_items: u32,
}

impl From<&Trip> for TripSummary {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id,
            name: trip.name.clone(),
            destination: trip.destination.clone(),
            start_date: trip.start_date,
            end_date: trip.end_date,
            archived: trip.archived,
            created_at: trip.created_at,
            total_days: trip.days.len() as u32,
            total_items: trip.days.iter().map(|day| day.items.len() as u32).sum(),
        }
    }
}
