//! User, trip and day operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::{PlannerError, Result},
    models::{Day, Item, Trip, TripSummary, UpdateTripRequest, User},
    params::{
        parse_date, AppendDay, CreateTrip, CreateUser, DayRef, Id, ListTrips, TripRef, UpdateTrip,
    },
};

impl TripPlanner {
    /// Registers a new user.
    pub async fn create_user(&self, params: &CreateUser) -> Result<User> {
        let username = params.username.clone();
        self.with_database(move |db| db.create_user(&username))
            .await
    }

    pub async fn get_user(&self, params: &Id) -> Result<User> {
        let user_id = params.id;
        self.with_database(move |db| db.get_user(user_id)).await
    }

    /// Creates a trip. Dates are ISO `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - When the name is empty, a date does not parse or
    ///   the end date precedes the start date
    /// * `UserNotFound` - When the owner does not exist
    pub async fn create_trip(&self, params: &CreateTrip) -> Result<Trip> {
        let start_date = parse_date("start_date", params.start_date.as_deref())?;
        let end_date = parse_date("end_date", params.end_date.as_deref())?;
        let params = params.clone();

        self.with_database(move |db| {
            db.create_trip(
                params.user_id,
                &params.name,
                params.destination.as_deref(),
                start_date,
                end_date,
            )
        })
        .await
    }

    /// Lists active trips, or archived ones when requested.
    pub async fn list_trips(&self, params: &ListTrips) -> Result<Vec<TripSummary>> {
        let (user_id, archived) = (params.user_id, params.archived);
        self.with_database(move |db| db.list_trips(user_id, archived))
            .await
    }

    /// Loads a trip with its days and ordered items.
    pub async fn get_trip(&self, params: &TripRef) -> Result<Trip> {
        let (user_id, trip_id) = (params.user_id, params.trip_id);
        self.with_database(move |db| db.get_trip(user_id, trip_id))
            .await
    }

    /// Edits a trip's name, destination, dates or archived flag.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - When nothing would change, the name is blank, a
    ///   date does not parse or the end date would precede the start date
    /// * `TripNotFound` / `Forbidden` - When the trip is absent or not owned
    pub async fn update_trip(&self, params: &UpdateTrip) -> Result<Trip> {
        if params.is_empty() {
            return Err(PlannerError::invalid_input("trip").with_reason("no fields to update"));
        }
        let request = UpdateTripRequest::try_from(params)?;
        let (user_id, trip_id) = (params.user_id, params.trip_id);

        self.with_database(move |db| db.update_trip(user_id, trip_id, &request))
            .await
    }

    /// Archives a trip (soft delete).
    pub async fn archive_trip(&self, params: &TripRef) -> Result<Trip> {
        self.set_archived(params, true).await
    }

    /// Restores an archived trip.
    pub async fn unarchive_trip(&self, params: &TripRef) -> Result<Trip> {
        self.set_archived(params, false).await
    }

    async fn set_archived(&self, params: &TripRef, archived: bool) -> Result<Trip> {
        self.update_trip(&UpdateTrip {
            user_id: params.user_id,
            trip_id: params.trip_id,
            archived: Some(archived),
            ..Default::default()
        })
        .await
    }

    /// Deletes a trip with its days and items. Saved places pointing into
    /// the trip are re-pointed or unplaced.
    pub async fn delete_trip(&self, params: &TripRef) -> Result<()> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.delete_trip(&params))
            .await
    }

    /// Appends a day after the trip's last day.
    pub async fn append_day(&self, params: &AppendDay) -> Result<Day> {
        let params = params.clone();
        self.with_database(move |db| {
            db.append_day(params.user_id, params.trip_id, params.notes.as_deref())
        })
        .await
    }

    /// Loads one day with its ordered items.
    pub async fn get_day(&self, params: &DayRef) -> Result<Day> {
        let (user_id, day_id) = (params.user_id, params.day_id);
        self.with_database(move |db| db.get_day(user_id, day_id))
            .await
    }

    /// Deletes a day and its items, renumbering the days after it.
    pub async fn delete_day(&self, params: &DayRef) -> Result<()> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.delete_day(&params))
            .await
    }

    /// Rewrites a day's item ranks to `1..=n`.
    pub async fn rebalance_day(&self, params: &DayRef) -> Result<Vec<Item>> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.rebalance_day(&params))
            .await
    }

    /// Reports whether a day's ranks are close to the precision floor.
    pub async fn day_needs_rebalance(&self, params: &DayRef) -> Result<bool> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.day_needs_rebalance(&params))
            .await
    }
}
