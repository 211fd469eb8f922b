//! Data models for trips, days, itinerary items and places.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping the data structures free of
//! presentation logic.
//!
//! # Ordering
//!
//! Items carry a fixed-point [`Rank`](crate::rank::Rank) and are displayed in
//! ascending rank order within their day. Days carry a dense `day_number`
//! (`1..=N` per trip) that defines calendar order.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::models::{Item, TransportMode};
//! use waypoint_core::rank::Rank;
//! use jiff::Timestamp;
//!
//! let item = Item {
//!     id: 1,
//!     day_id: 1,
//!     place_id: 42,
//!     rank: Rank::ONE,
//!     transport_to_next: Some(TransportMode::Walk),
//! #   scheduled_time: None,
//! #   duration_minutes: None,
//! #   notes: None,
//! #   transport_duration_minutes: None,
//! #   created_at: Timestamp::now(),
//! #   updated_at: Timestamp::now(),
//! };
//! println!("{}", item);
//! ```

pub mod day;
pub mod item;
pub mod place;
pub mod requests;
pub mod saved_place;
pub mod summary;
pub mod transport;
pub mod trip;
pub mod user;


pub use day::Day;
pub use item::Item;
pub use place::Place;
pub use requests::{NewItem, UpdateItemRequest, UpdateTripRequest};
pub use saved_place::SavedPlace;
pub use summary::TripSummary;
pub use transport::TransportMode;
pub use trip::Trip;
pub use user::User;
