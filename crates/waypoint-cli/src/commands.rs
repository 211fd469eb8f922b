//! Subcommand argument definitions using clap
//!
//! Each argument struct mirrors one core parameter type from
//! [`waypoint_core::params`]. Commands that act on behalf of a user convert
//! through `into_params(user_id)`, since the acting user comes from the
//! global `--user` flag rather than from the subcommand itself.
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → TripPlanner
//! ```

use std::fmt;

use clap::{Args, Subcommand, ValueEnum};
use waypoint_core::params::*;

// ============================================================================
// Users
// ============================================================================

/// Register a new user
#[derive(Args)]
pub struct CreateUserArgs {
    /// Unique username
    pub username: String,
}

impl From<CreateUserArgs> for CreateUser {
    fn from(val: CreateUserArgs) -> Self {
        CreateUser {
            username: val.username,
        }
    }
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    #[command(alias = "c")]
    Create(CreateUserArgs),
}

// ============================================================================
// Trips
// ============================================================================

/// Create a new trip
#[derive(Args)]
pub struct CreateTripArgs {
    /// Name of the trip
    pub name: String,
    #[arg(short, long, help = "Where the trip goes")]
    pub destination: Option<String>,
    #[arg(long, help = "First day of the trip (YYYY-MM-DD); days get dates from it")]
    pub start: Option<String>,
    #[arg(long, help = "Last day of the trip (YYYY-MM-DD)")]
    pub end: Option<String>,
}

impl CreateTripArgs {
    pub fn into_params(self, user_id: u64) -> CreateTrip {
        CreateTrip {
            user_id,
            name: self.name,
            destination: self.destination,
            start_date: self.start,
            end_date: self.end,
        }
    }
}

/// List trips
///
/// Shows active trips by default, or archived trips with --archived.
#[derive(Args)]
pub struct ListTripsArgs {
    #[arg(long, help = "Show archived trips instead of active ones")]
    pub archived: bool,
}

impl ListTripsArgs {
    pub fn into_params(self, user_id: u64) -> ListTrips {
        ListTrips {
            user_id,
            archived: self.archived,
        }
    }
}

/// Identifies a trip by ID
#[derive(Args)]
pub struct TripIdArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub id: u64,
}

impl TripIdArgs {
    pub fn into_params(self, user_id: u64) -> TripRef {
        TripRef {
            user_id,
            trip_id: self.id,
        }
    }
}

/// Edit a trip
#[derive(Args)]
pub struct UpdateTripArgs {
    #[arg(help = "Unique identifier of the trip to update")]
    pub id: u64,
    #[arg(long, help = "New name for the trip")]
    pub name: Option<String>,
    #[arg(short, long, help = "Where the trip goes")]
    pub destination: Option<String>,
    #[arg(long, help = "New first day (YYYY-MM-DD); every day is re-dated from it")]
    pub start: Option<String>,
    #[arg(long, help = "New last day (YYYY-MM-DD)")]
    pub end: Option<String>,
}

impl UpdateTripArgs {
    /// Human-readable list of the fields this update sets.
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push(format!("Renamed to '{name}'"));
        }
        if let Some(destination) = &self.destination {
            changes.push(format!("Destination set to {destination}"));
        }
        if let Some(start) = &self.start {
            changes.push(format!("Starts {start}"));
        }
        if let Some(end) = &self.end {
            changes.push(format!("Ends {end}"));
        }
        changes
    }

    pub fn into_params(self, user_id: u64) -> UpdateTrip {
        UpdateTrip {
            user_id,
            trip_id: self.id,
            name: self.name,
            destination: self.destination,
            start_date: self.start,
            end_date: self.end,
            archived: None,
        }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List trips
    #[command(aliases = ["l", "ls"])]
    List(ListTripsArgs),
    /// Show a trip with its days and items
    #[command(alias = "s")]
    Show(TripIdArgs),
    /// Archive a trip, hiding it from the default list
    #[command(alias = "a")]
    Archive(TripIdArgs),
    /// Restore an archived trip
    #[command(alias = "u")]
    Unarchive(TripIdArgs),
    /// Edit a trip's name, destination or dates
    Update(UpdateTripArgs),
    /// Delete a trip with all its days and items
    #[command(alias = "rm")]
    Delete(TripIdArgs),
}

// ============================================================================
// Days
// ============================================================================

/// Append a day to the end of a trip
#[derive(Args)]
pub struct AddDayArgs {
    #[arg(help = "Unique identifier of the trip to extend")]
    pub trip_id: u64,
    #[arg(short, long, help = "Notes for the day")]
    pub notes: Option<String>,
}

impl AddDayArgs {
    pub fn into_params(self, user_id: u64) -> AppendDay {
        AppendDay {
            user_id,
            trip_id: self.trip_id,
            notes: self.notes,
        }
    }
}

/// Identifies a day by ID
#[derive(Args)]
pub struct DayIdArgs {
    #[arg(help = "Unique identifier of the day")]
    pub id: u64,
}

impl DayIdArgs {
    pub fn into_params(self, user_id: u64) -> DayRef {
        DayRef {
            user_id,
            day_id: self.id,
        }
    }
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Append a day to a trip
    #[command(alias = "a")]
    Add(AddDayArgs),
    /// Delete a day and its items; later days move up by one
    #[command(aliases = ["d", "rm"])]
    Delete(DayIdArgs),
    /// Respace a day's item ranks to 1, 2, 3, ...
    #[command(alias = "r")]
    Rebalance(DayIdArgs),
    /// Report whether a day's ranks have grown too close together
    Check(DayIdArgs),
}

// ============================================================================
// Places
// ============================================================================

/// Add a place to the shared pool
#[derive(Args)]
pub struct CreatePlaceArgs {
    /// Name of the place
    pub name: String,
    #[arg(short, long, help = "Street address")]
    pub address: Option<String>,
    #[arg(short = 't', long = "type", help = "Kind of place, e.g. museum or restaurant")]
    pub place_type: Option<String>,
    #[arg(long, allow_hyphen_values = true, requires = "lon", help = "Latitude in degrees")]
    pub lat: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "lat", help = "Longitude in degrees")]
    pub lon: Option<f64>,
}

impl From<CreatePlaceArgs> for CreatePlace {
    fn from(val: CreatePlaceArgs) -> Self {
        CreatePlace {
            name: val.name,
            address: val.address,
            place_type: val.place_type,
            latitude: val.lat,
            longitude: val.lon,
        }
    }
}

/// Bookmark a place
#[derive(Args)]
pub struct SavePlaceArgs {
    #[arg(help = "Unique identifier of the place to save")]
    pub place_id: u64,
    #[arg(short, long, help = "Why the place is worth a visit")]
    pub notes: Option<String>,
}

impl SavePlaceArgs {
    pub fn into_params(self, user_id: u64) -> SavePlace {
        SavePlace {
            user_id,
            place_id: self.place_id,
            notes: self.notes,
        }
    }
}

/// Identifies a saved place by its place ID
#[derive(Args)]
pub struct PlaceIdArgs {
    #[arg(help = "Unique identifier of the place")]
    pub place_id: u64,
}

impl PlaceIdArgs {
    pub fn into_params(self, user_id: u64) -> PlaceRef {
        PlaceRef {
            user_id,
            place_id: self.place_id,
        }
    }
}

/// Browse the place pool
#[derive(Args)]
pub struct ListPlacesArgs {
    #[arg(short, long, help = "Only places whose name contains this text")]
    pub search: Option<String>,
    #[arg(short = 't', long = "type", help = "Only places of this kind")]
    pub place_type: Option<String>,
    #[arg(long, help = "Maximum number of places to show (1-500, default 100)")]
    pub limit: Option<u32>,
}

impl From<ListPlacesArgs> for ListPlaces {
    fn from(val: ListPlacesArgs) -> Self {
        ListPlaces {
            search: val.search,
            place_type: val.place_type,
            limit: val.limit,
        }
    }
}

#[derive(Subcommand)]
pub enum PlaceCommands {
    /// Add a place to the shared pool
    #[command(alias = "c")]
    Create(CreatePlaceArgs),
    /// List places in the pool, optionally filtered
    #[command(aliases = ["l", "ls"])]
    List(ListPlacesArgs),
    /// Bookmark a place
    Save(SavePlaceArgs),
    /// Remove a bookmark
    Unsave(PlaceIdArgs),
    /// List bookmarked places and whether they are scheduled
    Saved,
}

// ============================================================================
// Items
// ============================================================================

/// Schedule a place on a day
#[derive(Args)]
pub struct AddItemArgs {
    #[arg(help = "Unique identifier of the day")]
    pub day_id: u64,
    #[arg(help = "Unique identifier of the place to schedule")]
    pub place_id: u64,
    #[arg(
        short,
        long,
        help = "0-based position within the day (0 = first); appends when omitted"
    )]
    pub position: Option<i64>,
    #[arg(long, help = "Scheduled start time (HH:MM)")]
    pub time: Option<String>,
    #[arg(long, help = "Planned visit length in minutes")]
    pub duration: Option<u32>,
    #[arg(short, long, help = "Notes for this visit")]
    pub notes: Option<String>,
}

impl AddItemArgs {
    pub fn into_params(self, user_id: u64) -> PlaceItem {
        PlaceItem {
            user_id,
            day_id: self.day_id,
            place_id: self.place_id,
            position: self.position,
            scheduled_time: self.time,
            duration_minutes: self.duration,
            notes: self.notes,
        }
    }
}

/// Move an item within its day or to another day
#[derive(Args)]
pub struct MoveItemArgs {
    #[arg(help = "Unique identifier of the item to move")]
    pub item_id: u64,
    #[arg(help = "Unique identifier of the destination day")]
    pub day_id: u64,
    #[arg(help = "0-based position in the destination day as currently listed")]
    pub position: i64,
}

impl MoveItemArgs {
    pub fn into_params(self, user_id: u64) -> MoveItem {
        MoveItem {
            user_id,
            item_id: self.item_id,
            target_day_id: self.day_id,
            target_position: self.position,
        }
    }
}

/// Edit an item's schedule or transport link
#[derive(Args)]
pub struct UpdateItemArgs {
    #[arg(help = "Unique identifier of the item to update")]
    pub item_id: u64,
    #[arg(long, help = "Scheduled start time (HH:MM)")]
    pub time: Option<String>,
    #[arg(long, help = "Planned visit length in minutes")]
    pub duration: Option<u32>,
    #[arg(short, long, help = "Notes for this visit")]
    pub notes: Option<String>,
    #[arg(long, help = "How to get to the next item of the day")]
    pub transport: Option<TransportArg>,
    #[arg(long, help = "Travel time to the next item in minutes")]
    pub transport_duration: Option<u32>,
}

impl UpdateItemArgs {
    /// Human-readable list of the fields this update sets.
    pub fn changes(&self) -> Vec<String> {
        let mut changes = Vec::new();
        if let Some(time) = &self.time {
            changes.push(format!("Scheduled at {time}"));
        }
        if let Some(minutes) = self.duration {
            changes.push(format!("Duration set to {minutes} min"));
        }
        if self.notes.is_some() {
            changes.push("Updated notes".to_string());
        }
        if let Some(mode) = self.transport {
            changes.push(format!("Transport to next set to {mode}"));
        }
        if let Some(minutes) = self.transport_duration {
            changes.push(format!("Travel time set to {minutes} min"));
        }
        changes
    }

    pub fn into_params(self, user_id: u64) -> UpdateItem {
        UpdateItem {
            user_id,
            item_id: self.item_id,
            scheduled_time: self.time,
            duration_minutes: self.duration,
            notes: self.notes,
            transport_to_next: self.transport.map(|mode| mode.to_string()),
            transport_duration_minutes: self.transport_duration,
        }
    }
}

/// Identifies an item by ID
#[derive(Args)]
pub struct ItemIdArgs {
    #[arg(help = "Unique identifier of the item")]
    pub item_id: u64,
}

impl ItemIdArgs {
    pub fn into_params(self, user_id: u64) -> ItemRef {
        ItemRef {
            user_id,
            item_id: self.item_id,
        }
    }
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Schedule a place on a day
    #[command(alias = "a")]
    Add(AddItemArgs),
    /// Move an item within its day or to another day
    #[command(alias = "m")]
    Move(MoveItemArgs),
    /// Edit an item's schedule or transport link
    #[command(alias = "u")]
    Update(UpdateItemArgs),
    /// Remove an item from its day
    #[command(aliases = ["d", "rm"])]
    Delete(ItemIdArgs),
}

/// Command-line representation of transport modes
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TransportArg {
    Walk,
    Subway,
    Bus,
    Train,
    Taxi,
    Drive,
}

impl fmt::Display for TransportArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportArg::Walk => write!(f, "walk"),
            TransportArg::Subway => write!(f, "subway"),
            TransportArg::Bus => write!(f, "bus"),
            TransportArg::Train => write!(f, "train"),
            TransportArg::Taxi => write!(f, "taxi"),
            TransportArg::Drive => write!(f, "drive"),
        }
    }
}
