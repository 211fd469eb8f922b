//! Builder for creating and configuring TripPlanner instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::TripPlanner;
use crate::{
    db::Database,
    error::{PlannerError, Result, ResultExt},
    rank::RankConfig,
};

/// Builder for creating and configuring TripPlanner instances.
#[derive(Debug, Clone, Default)]
pub struct TripPlannerBuilder {
    database_path: Option<PathBuf>,
    rank_config: RankConfig,
}

impl TripPlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the rank precision and rebalance threshold used for ordering.
    pub fn with_rank_config(mut self, rank_config: RankConfig) -> Self {
        self.rank_config = rank_config;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Configuration` if the rank configuration is
    /// inconsistent
    /// Returns `PlannerError::FileSystem` if the database path is invalid
    /// Returns `PlannerError::Database` if database initialization fails
    pub async fn build(self) -> Result<TripPlanner> {
        self.rank_config.validate()?;

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlannerError>(())
        })
        .await
        .with_context("Task join error")??;

        debug!("Using database at {}", db_path.display());
        Ok(TripPlanner::new(db_path, self.rank_config))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
