//! Command handlers bridging parsed arguments to the trip planner.

use std::fmt::Display;

use anyhow::{Context, Result};
use serde::Serialize;
use waypoint_core::{
    display::{
        to_json, CreateResult, DeleteResult, OperationStatus, Places, SavedPlaces, TripSummaries,
        UpdateResult,
    },
    params::{Id, ListTrips},
    TripPlanner,
};

use crate::{
    commands::{DayCommands, ItemCommands, PlaceCommands, TripCommands, UserCommands},
    renderer::TerminalRenderer,
};

/// Outcome of `day check`, used for JSON output.
#[derive(Serialize)]
struct RebalanceCheck {
    day_id: u64,
    needs_rebalance: bool,
}

/// Runs commands as one user and prints their results.
pub struct Cli {
    planner: TripPlanner,
    renderer: TerminalRenderer,
    user_id: u64,
    json: bool,
}

impl Cli {
    pub fn new(planner: TripPlanner, renderer: TerminalRenderer, user_id: u64, json: bool) -> Self {
        Self {
            planner,
            renderer,
            user_id,
            json,
        }
    }

    /// Prints `value` as JSON, or `markdown` through the renderer.
    fn emit<T: Serialize>(&self, value: &T, markdown: impl Display) -> Result<()> {
        if self.json {
            println!("{}", to_json(value)?);
        } else {
            self.renderer.render(&markdown.to_string());
        }
        Ok(())
    }

    pub async fn handle_user_command(&self, command: UserCommands) -> Result<()> {
        match command {
            UserCommands::Create(args) => {
                let user = self
                    .planner
                    .create_user(&args.into())
                    .await
                    .context("Failed to create user")?;
                self.emit(&user, CreateResult::new(user.clone()))
            }
        }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        let user_id = self.user_id;
        match command {
            TripCommands::Create(args) => {
                let trip = self
                    .planner
                    .create_trip(&args.into_params(user_id))
                    .await
                    .context("Failed to create trip")?;
                self.emit(&trip, CreateResult::new(trip.clone()))
            }
            TripCommands::List(args) => self.list_trips(args.archived).await,
            TripCommands::Show(args) => {
                let params = args.into_params(user_id);
                let trip = self
                    .planner
                    .get_trip(&params)
                    .await
                    .with_context(|| format!("Failed to load trip {}", params.trip_id))?;
                self.emit(&trip, &trip)
            }
            TripCommands::Archive(args) => {
                let trip = self
                    .planner
                    .archive_trip(&args.into_params(user_id))
                    .await
                    .context("Failed to archive trip")?;
                let status = OperationStatus::success(format!(
                    "Archived trip '{}' (ID: {})",
                    trip.name, trip.id
                ));
                self.emit(&trip, status)
            }
            TripCommands::Unarchive(args) => {
                let trip = self
                    .planner
                    .unarchive_trip(&args.into_params(user_id))
                    .await
                    .context("Failed to unarchive trip")?;
                let status = OperationStatus::success(format!(
                    "Restored trip '{}' (ID: {})",
                    trip.name, trip.id
                ));
                self.emit(&trip, status)
            }
            TripCommands::Update(args) => {
                let changes = args.changes();
                let trip = self
                    .planner
                    .update_trip(&args.into_params(user_id))
                    .await
                    .context("Failed to update trip")?;
                self.emit(&trip, UpdateResult::with_changes(trip.clone(), changes))
            }
            TripCommands::Delete(args) => {
                let params = args.into_params(user_id);
                let trip = self
                    .planner
                    .get_trip(&params)
                    .await
                    .with_context(|| format!("Failed to load trip {}", params.trip_id))?;
                self.planner
                    .delete_trip(&params)
                    .await
                    .context("Failed to delete trip")?;
                self.emit(&trip, DeleteResult::new(trip.clone()))
            }
        }
    }

    /// Lists the user's active or archived trips.
    pub async fn list_trips(&self, archived: bool) -> Result<()> {
        let trips = self
            .planner
            .list_trips(&ListTrips {
                user_id: self.user_id,
                archived,
            })
            .await
            .context("Failed to list trips")?;
        self.emit(&trips, TripSummaries(trips.clone()))
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        let user_id = self.user_id;
        match command {
            DayCommands::Add(args) => {
                let day = self
                    .planner
                    .append_day(&args.into_params(user_id))
                    .await
                    .context("Failed to add day")?;
                self.emit(&day, CreateResult::new(day.clone()))
            }
            DayCommands::Delete(args) => {
                let params = args.into_params(user_id);
                let day = self
                    .planner
                    .get_day(&params)
                    .await
                    .with_context(|| format!("Failed to load day {}", params.day_id))?;
                self.planner
                    .delete_day(&params)
                    .await
                    .context("Failed to delete day")?;
                self.emit(&day, DeleteResult::new(day.clone()))
            }
            DayCommands::Rebalance(args) => {
                let params = args.into_params(user_id);
                self.planner
                    .rebalance_day(&params)
                    .await
                    .context("Failed to rebalance day")?;
                let day = self.planner.get_day(&params).await?;
                self.emit(
                    &day,
                    UpdateResult::with_changes(
                        day.clone(),
                        vec![format!("Respaced {} item rank(s)", day.items.len())],
                    ),
                )
            }
            DayCommands::Check(args) => {
                let params = args.into_params(user_id);
                let needs_rebalance = self
                    .planner
                    .day_needs_rebalance(&params)
                    .await
                    .context("Failed to check day")?;
                let status = if needs_rebalance {
                    OperationStatus::failure(format!(
                        "Day {} needs a rebalance; run `wp day rebalance {}`",
                        params.day_id, params.day_id
                    ))
                } else {
                    OperationStatus::success(format!("Day {} ranks are well spaced", params.day_id))
                };
                let check = RebalanceCheck {
                    day_id: params.day_id,
                    needs_rebalance,
                };
                self.emit(&check, status)
            }
        }
    }

    pub async fn handle_place_command(&self, command: PlaceCommands) -> Result<()> {
        let user_id = self.user_id;
        match command {
            PlaceCommands::Create(args) => {
                let place = self
                    .planner
                    .create_place(&args.into())
                    .await
                    .context("Failed to create place")?;
                self.emit(&place, CreateResult::new(place.clone()))
            }
            PlaceCommands::List(args) => {
                let places = self
                    .planner
                    .list_places(&args.into())
                    .await
                    .context("Failed to list places")?;
                self.emit(&places, Places(places.clone()))
            }
            PlaceCommands::Save(args) => {
                let saved = self
                    .planner
                    .save_place(&args.into_params(user_id))
                    .await
                    .context("Failed to save place")?;
                self.emit(&saved, CreateResult::new(saved.clone()))
            }
            PlaceCommands::Unsave(args) => {
                let params = args.into_params(user_id);
                let saved = self
                    .planner
                    .get_saved_place(&params)
                    .await
                    .with_context(|| format!("Place {} is not saved", params.place_id))?;
                self.planner
                    .unsave_place(&params)
                    .await
                    .context("Failed to unsave place")?;
                self.emit(&saved, DeleteResult::new(saved.clone()))
            }
            PlaceCommands::Saved => {
                let saved = self
                    .planner
                    .list_saved_places(&Id { id: user_id })
                    .await
                    .context("Failed to list saved places")?;
                self.emit(&saved, SavedPlaces(saved.clone()))
            }
        }
    }

    pub async fn handle_item_command(&self, command: ItemCommands) -> Result<()> {
        let user_id = self.user_id;
        match command {
            ItemCommands::Add(args) => {
                let item = self
                    .planner
                    .place_item(&args.into_params(user_id))
                    .await
                    .context("Failed to schedule place")?;
                self.emit(&item, CreateResult::new(item.clone()))
            }
            ItemCommands::Move(args) => {
                let params = args.into_params(user_id);
                let item = self
                    .planner
                    .move_item(&params)
                    .await
                    .with_context(|| format!("Failed to move item {}", params.item_id))?;
                let change = format!(
                    "Moved to position {} of day {}",
                    params.target_position, params.target_day_id
                );
                self.emit(&item, UpdateResult::with_changes(item.clone(), vec![change]))
            }
            ItemCommands::Update(args) => {
                let changes = args.changes();
                let item = self
                    .planner
                    .update_item(&args.into_params(user_id))
                    .await
                    .context("Failed to update item")?;
                self.emit(&item, UpdateResult::with_changes(item.clone(), changes))
            }
            ItemCommands::Delete(args) => {
                let params = args.into_params(user_id);
                let item = self
                    .planner
                    .get_item(&params)
                    .await
                    .with_context(|| format!("Failed to load item {}", params.item_id))?;
                self.planner
                    .delete_item(&params)
                    .await
                    .context("Failed to delete item")?;
                self.emit(&item, DeleteResult::new(item.clone()))
            }
        }
    }
}
