//! Saved place model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A place a user bookmarked as a candidate for their itineraries.
///
/// `is_placed` and `current_item_id` are maintained by the ordering
/// coordinator: placing an item sets them, deleting the last live item of
/// the place clears them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavedPlace {
    pub id: u64,

    pub user_id: u64,

    pub place_id: u64,

    /// Name of the referenced place, joined in for listings
    pub place_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Whether the place is currently scheduled in one of the user's trips
    pub is_placed: bool,

    /// The item the place currently occupies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_item_id: Option<u64>,

    pub saved_at: Timestamp,
}
