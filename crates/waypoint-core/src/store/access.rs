//! Ownership checks over a unit of work.
//!
//! The acting user is trusted to be authenticated, but every row loaded on
//! their behalf is re-checked against the trip that owns it.

use super::UnitOfWork;
use crate::{
    error::{PlannerError, Result},
    models::{Day, Item, Trip},
};

/// Loads a trip owned by `user_id`.
pub(crate) fn owned_trip<U: UnitOfWork>(unit: &U, trip_id: u64, user_id: u64) -> Result<Trip> {
    let trip = unit
        .trip(trip_id)?
        .ok_or(PlannerError::TripNotFound { id: trip_id })?;
    if trip.user_id != user_id {
        return Err(PlannerError::forbidden("trip", trip_id, user_id));
    }
    Ok(trip)
}

/// Loads a day and its trip, both owned by `user_id`.
pub(crate) fn owned_day<U: UnitOfWork>(unit: &U, day_id: u64, user_id: u64) -> Result<(Day, Trip)> {
    let day = unit
        .day(day_id)?
        .ok_or(PlannerError::DayNotFound { id: day_id })?;
    let trip = unit
        .trip(day.trip_id)?
        .ok_or(PlannerError::TripNotFound { id: day.trip_id })?;
    if trip.user_id != user_id {
        return Err(PlannerError::forbidden("day", day_id, user_id));
    }
    Ok((day, trip))
}

/// Loads an item together with its day and trip.
pub(crate) fn owned_item<U: UnitOfWork>(
    unit: &U,
    item_id: u64,
    user_id: u64,
) -> Result<(Item, Day, Trip)> {
    let item = unit
        .item(item_id)?
        .ok_or(PlannerError::ItemNotFound { id: item_id })?;
    let (day, trip) = owned_day(unit, item.day_id, user_id).map_err(|err| match err {
        PlannerError::Forbidden { user_id, .. } => PlannerError::forbidden("item", item_id, user_id),
        other => other,
    })?;
    Ok((item, day, trip))
}
