//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly and render as
//! markdown. Collections and operation outcomes get newtype wrappers so the
//! CLI can print any result with a single `format!`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │  Wrappers and   │    │    Markdown     │
//! │ (Trip, Day, …)  │───▶│  Result Types   │───▶│ or JSON output  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (TripSummaries, Places,
//!   SavedPlaces)
//! - [`results`]: Operation result types (CreateResult, UpdateResult,
//!   DeleteResult)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use waypoint_core::{display::CreateResult, models::Place};
//! use jiff::Timestamp;
//!
//! let place = Place {
//!     id: 7,
//!     name: "Alhambra".to_string(),
//!     address: Some("Calle Real de la Alhambra".to_string()),
//!     place_type: Some("monument".to_string()),
//!     latitude: Some(37.176),
//!     longitude: Some(-3.588),
//!     created_at: Timestamp::now(),
//! };
//!
//! let output = format!("{}", CreateResult::new(place));
//! assert!(output.contains("Created place with ID: 7"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

use serde::Serialize;

use crate::error::Result;

pub use collections::{Places, SavedPlaces, TripSummaries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;

/// Serializes any model as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
