//! Parameter structures for itinerary operations
//!
//! Shared parameter structures used by every interface (the CLI today)
//! without framework-specific derives. Interface layers define their own
//! argument wrappers and convert into these, supplying the acting user.
//!
//! Every mutating parameter carries the acting `user_id`. Authorization of
//! the request itself happens before the core is invoked, but the core
//! re-validates ownership for every row it loads on the caller's behalf.

use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for registering a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    pub username: String,
}

/// Parameters for creating a new trip.
///
/// Dates use ISO format (`YYYY-MM-DD`) and are validated when the trip is
/// created.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTrip {
    /// Owner of the new trip
    pub user_id: u64,
    /// Name of the trip (required)
    pub name: String,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parameters for listing a user's trips.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTrips {
    pub user_id: u64,
    /// Whether to show archived trips instead of active ones
    #[serde(default)]
    pub archived: bool,
}

/// Reference to a trip on behalf of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripRef {
    pub user_id: u64,
    pub trip_id: u64,
}

/// Parameters for editing a trip.
///
/// Only provided fields change. A new start date re-dates every day of the
/// trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrip {
    pub user_id: u64,
    pub trip_id: u64,
    pub name: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub archived: Option<bool>,
}

impl UpdateTrip {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.destination.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.archived.is_none()
    }
}

/// Parameters for appending a day to the end of a trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppendDay {
    pub user_id: u64,
    pub trip_id: u64,
    pub notes: Option<String>,
}

/// Reference to a day on behalf of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayRef {
    pub user_id: u64,
    pub day_id: u64,
}

/// Parameters for adding a place to the global pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlace {
    pub name: String,
    pub address: Option<String>,
    pub place_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Filters for browsing the place pool.
///
/// `search` matches a case-insensitive substring of the name. `limit`
/// defaults to [`ListPlaces::DEFAULT_LIMIT`] and must lie in
/// `1..=ListPlaces::MAX_LIMIT`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlaces {
    pub search: Option<String>,
    pub place_type: Option<String>,
    pub limit: Option<u32>,
}

impl ListPlaces {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const MAX_LIMIT: u32 = 500;

    /// The requested limit, or the default.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - When the limit is outside `1..=MAX_LIMIT`
    pub fn limit(&self) -> crate::Result<u32> {
        match self.limit {
            None => Ok(Self::DEFAULT_LIMIT),
            Some(limit) if (1..=Self::MAX_LIMIT).contains(&limit) => Ok(limit),
            Some(limit) => Err(crate::PlannerError::invalid_input("limit")
                .with_reason(format!("{limit} is outside 1..={}", Self::MAX_LIMIT))),
        }
    }
}

/// Parameters for bookmarking a place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavePlace {
    pub user_id: u64,
    pub place_id: u64,
    pub notes: Option<String>,
}

/// Reference to a user's saved place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceRef {
    pub user_id: u64,
    pub place_id: u64,
}

/// Parameters for placing a place into a day.
///
/// `position` is a 0-based insertion index among the day's current items;
/// `None` appends. Out-of-range positions are clamped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceItem {
    pub user_id: u64,
    pub day_id: u64,
    pub place_id: u64,
    #[serde(default)]
    pub position: Option<i64>,
    /// Planned arrival time (`HH:MM` or `HH:MM:SS`)
    pub scheduled_time: Option<String>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

/// Parameters for a drag-and-drop move.
///
/// `target_position` is expressed against the target day's list as the user
/// sees it, i.e. including the moving item when the move stays in one day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveItem {
    pub user_id: u64,
    pub item_id: u64,
    pub target_day_id: u64,
    pub target_position: i64,
}

/// Reference to an item on behalf of a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRef {
    pub user_id: u64,
    pub item_id: u64,
}

/// Parameters for editing an item's scheduling metadata.
///
/// Only provided fields change. Rank and day are never touched here; use
/// [`MoveItem`] for that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItem {
    pub user_id: u64,
    pub item_id: u64,
    pub scheduled_time: Option<String>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    /// Transport mode to the next item (walk, subway, bus, train, taxi, drive)
    pub transport_to_next: Option<String>,
    pub transport_duration_minutes: Option<u32>,
}

impl UpdateItem {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.scheduled_time.is_none()
            && self.duration_minutes.is_none()
            && self.notes.is_none()
            && self.transport_to_next.is_none()
            && self.transport_duration_minutes.is_none()
    }
}

/// Parses an optional `HH:MM[:SS]` time string.
pub(crate) fn parse_time(
    field: &str,
    value: Option<&str>,
) -> crate::Result<Option<jiff::civil::Time>> {
    value
        .map(|raw| {
            raw.trim().parse::<jiff::civil::Time>().map_err(|e| {
                crate::PlannerError::invalid_input(field).with_reason(format!("'{raw}': {e}"))
            })
        })
        .transpose()
}

/// Parses an optional ISO `YYYY-MM-DD` date string.
pub(crate) fn parse_date(
    field: &str,
    value: Option<&str>,
) -> crate::Result<Option<jiff::civil::Date>> {
    value
        .map(|raw| {
            raw.trim().parse::<jiff::civil::Date>().map_err(|e| {
                crate::PlannerError::invalid_input(field).with_reason(format!("'{raw}': {e}"))
            })
        })
        .transpose()
}
