use std::path::PathBuf;

use clap::{Parser, Subcommand};
use waypoint_core::Rank;

use crate::commands::{DayCommands, ItemCommands, PlaceCommands, TripCommands, UserCommands};

/// Plan trips day by day from the command line
///
/// Waypoint keeps trips, their days and the places scheduled on each day in a
/// local SQLite database. Items within a day can be inserted at any position
/// and moved freely; deleting a day renumbers the days after it.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// ID of the user performing the command
    #[arg(long, global = true, default_value_t = 1)]
    pub user: u64,

    /// Fractional digits kept when allocating ranks (1-10)
    #[arg(long, global = true)]
    pub rank_precision: Option<u32>,

    /// Gap between neighbouring ranks below which a day is reported as
    /// needing a rebalance
    #[arg(long, global = true)]
    pub rebalance_threshold: Option<Rank>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waypoint CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage the days of a trip
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Manage the place pool and saved places
    #[command(alias = "p")]
    Place {
        #[command(subcommand)]
        command: PlaceCommands,
    },
    /// Schedule, move and edit itinerary items
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
}
