//! Place model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A point of interest from the global place pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub id: u64,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Free-form category such as "restaurant" or "museum"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    pub created_at: Timestamp,
}
