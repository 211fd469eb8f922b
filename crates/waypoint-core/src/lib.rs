//! Core library for the Waypoint trip planner.
//!
//! The heart of the crate is the itinerary ordering engine: items within a
//! day are ordered by a fixed-point [`Rank`], inserts and moves bisect the
//! neighbouring ranks, days are renumbered densely when one is removed, and a
//! user's saved places track whether they are currently scheduled.
//!
//! # Layers
//!
//! - [`rank`]: rank arithmetic and allocation ([`RankAllocator`])
//! - [`store`]: the [`Repository`] / [`UnitOfWork`] seam plus an in-memory
//!   implementation
//! - [`ordering`]: [`OrderingCoordinator`], which runs every reordering
//!   operation inside one unit of work
//! - [`db`]: SQLite persistence, also implementing the store traits
//! - [`planner`]: the async [`TripPlanner`] facade used by the CLI
//! - [`display`]: markdown rendering of models and operation results
//!
//! # Quick Start
//!
//! ```rust
//! use waypoint_core::{
//!     params::{AppendDay, CreatePlace, CreateTrip, CreateUser, PlaceItem},
//!     TripPlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TripPlannerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let user = planner
//!     .create_user(&CreateUser { username: "ana".to_string() })
//!     .await?;
//! let trip = planner
//!     .create_trip(&CreateTrip {
//!         user_id: user.id,
//!         name: "Andalusia".to_string(),
//!         start_date: Some("2025-09-01".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! let day = planner
//!     .append_day(&AppendDay { user_id: user.id, trip_id: trip.id, notes: None })
//!     .await?;
//! let place = planner
//!     .create_place(&CreatePlace { name: "Alhambra".to_string(), ..Default::default() })
//!     .await?;
//!
//! let item = planner
//!     .place_item(&PlaceItem {
//!         user_id: user.id,
//!         day_id: day.id,
//!         place_id: place.id,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Scheduled: {}", item);
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod ordering;
pub mod params;
pub mod planner;
pub mod rank;
pub mod store;

// Re-export commonly used types
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, OperationStatus, Places, SavedPlaces,
    TripSummaries, UpdateResult,
};
pub use error::{PlannerError, Result};
pub use models::{Day, Item, Place, SavedPlace, TransportMode, Trip, TripSummary, User};
pub use ordering::OrderingCoordinator;
pub use planner::{TripPlanner, TripPlannerBuilder};
pub use rank::{Rank, RankAllocator, RankConfig};
pub use store::{MemoryStore, Repository, UnitOfWork};
