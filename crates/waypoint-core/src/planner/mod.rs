//! High-level async API over the itinerary database.
//!
//! [`TripPlanner`] is the entry point used by interfaces such as the CLI.
//! Every call opens its own SQLite connection on a blocking worker thread,
//! performs one operation and closes the connection again, so a planner is
//! cheap to clone and share between tasks.
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────────┐    ┌─────────────────┐
//! │   TripPlanner   │    │ OrderingCoordinator  │    │    Database     │
//! │ (trip_ops,      │───▶│  (place, move,       │───▶│   (via db/)     │
//! │  place_ops,     │    │   delete, rebalance) │    │                 │
//! │  item_ops)      │    └──────────────────────┘    │                 │
//! │                 │───────────────────────────────▶│  plain CRUD     │
//! └─────────────────┘                                └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`TripPlanner`] instances with configuration
//! - [`trip_ops`]: Users, trips and days, including day deletion
//! - [`place_ops`]: The place pool and saved places
//! - [`item_ops`]: Placing, moving, editing and deleting itinerary items
//!
//! # Examples
//!
//! ```rust,no_run
//! use waypoint_core::{
//!     params::{AppendDay, CreateTrip, CreateUser, PlaceItem, CreatePlace},
//!     TripPlannerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = TripPlannerBuilder::new()
//!     .with_database_path(Some("/tmp/waypoint.db"))
//!     .build()
//!     .await?;
//!
//! let user = planner.create_user(&CreateUser { username: "ana".into() }).await?;
//! let trip = planner
//!     .create_trip(&CreateTrip {
//!         user_id: user.id,
//!         name: "Lisbon".into(),
//!         start_date: Some("2025-06-01".into()),
//!         ..Default::default()
//!     })
//!     .await?;
//! let day = planner
//!     .append_day(&AppendDay { user_id: user.id, trip_id: trip.id, notes: None })
//!     .await?;
//! let place = planner
//!     .create_place(&CreatePlace { name: "Belem Tower".into(), ..Default::default() })
//!     .await?;
//!
//! planner
//!     .place_item(&PlaceItem {
//!         user_id: user.id,
//!         day_id: day.id,
//!         place_id: place.id,
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{Result, ResultExt},
    ordering::OrderingCoordinator,
    rank::{RankAllocator, RankConfig},
};

pub mod builder;
pub mod item_ops;
pub mod place_ops;
pub mod trip_ops;


pub use builder::TripPlannerBuilder;

/// Main planner interface for trips, places and itineraries.
#[derive(Debug, Clone)]
pub struct TripPlanner {
    pub(crate) db_path: PathBuf,
    pub(crate) rank_config: RankConfig,
}

impl TripPlanner {
    pub(crate) fn new(db_path: PathBuf, rank_config: RankConfig) -> Self {
        Self {
            db_path,
            rank_config,
        }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    pub fn rank_config(&self) -> &RankConfig {
        &self.rank_config
    }

    /// Runs `operation` against a fresh connection on a blocking thread.
    async fn with_database<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .with_context("Task join error")?
    }

    /// Runs `operation` through an ordering coordinator on a blocking thread.
    async fn with_coordinator<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut OrderingCoordinator<Database>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();
        let allocator = RankAllocator::new(self.rank_config);
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let mut coordinator = OrderingCoordinator::new(db, allocator);
            operation(&mut coordinator)
        })
        .await
        .with_context("Task join error")?
    }
}
