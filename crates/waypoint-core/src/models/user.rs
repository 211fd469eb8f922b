//! User model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Owner of trips and saved places.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub created_at: Timestamp,
}
