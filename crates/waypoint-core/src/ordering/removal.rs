//! Item deletion and the day and trip deletion cascades.

use log::{debug, info};

use crate::{
    error::Result,
    models::{trip::date_for_day, Day, Item},
    params::{DayRef, ItemRef, TripRef},
    store::{access, UnitOfWork},
};

pub(super) fn delete_item<U: UnitOfWork>(unit: &mut U, params: &ItemRef) -> Result<()> {
    let (item, _, trip) = access::owned_item(unit, params.item_id, params.user_id)?;
    remove_item(unit, trip.user_id, &item)
}

/// Deletes one item, re-pointing the owner's saved place at another live
/// item of the same place or clearing it.
fn remove_item<U: UnitOfWork>(unit: &mut U, owner_id: u64, item: &Item) -> Result<()> {
    if let Some(saved) = unit.saved_place(owner_id, item.place_id)? {
        let replacement = unit
            .live_items_for_place(owner_id, item.place_id)?
            .into_iter()
            .find(|other| other.id != item.id)
            .map(|other| other.id);
        if saved.current_item_id != replacement || saved.is_placed != replacement.is_some() {
            unit.set_saved_place_item(owner_id, item.place_id, replacement)?;
        }
    }

    unit.delete_item(item.id)?;
    debug!("Deleted item {} from day {}", item.id, item.day_id);
    Ok(())
}

pub(super) fn delete_day<U: UnitOfWork>(unit: &mut U, params: &DayRef) -> Result<()> {
    let (day, trip) = access::owned_day(unit, params.day_id, params.user_id)?;

    let items = unit.day_items(day.id)?;
    for item in &items {
        remove_item(unit, trip.user_id, item)?;
    }

    let later: Vec<Day> = unit
        .trip_days(trip.id)?
        .into_iter()
        .filter(|other| other.day_number > day.day_number)
        .collect();

    // Park later days on negative numbers so that no step of the shift
    // collides with UNIQUE(trip_id, day_number).
    for other in &later {
        unit.set_day_number(other.id, -other.day_number, other.date)?;
    }
    unit.delete_day(day.id)?;

    for other in &later {
        let day_number = other.day_number - 1;
        let date = match trip.start_date {
            Some(_) => date_for_day(trip.start_date, day_number)?,
            None => other.date.map(|date| date.yesterday()).transpose()?,
        };
        unit.set_day_number(other.id, day_number, date)?;
    }

    info!(
        "Deleted day {} (number {}) of trip {} with {} items; renumbered {} later days",
        day.id,
        day.day_number,
        trip.id,
        items.len(),
        later.len()
    );
    Ok(())
}

pub(super) fn delete_trip<U: UnitOfWork>(unit: &mut U, params: &TripRef) -> Result<()> {
    let trip = access::owned_trip(unit, params.trip_id, params.user_id)?;

    let days = unit.trip_days(trip.id)?;
    let mut removed = 0;
    for day in &days {
        let items = unit.day_items(day.id)?;
        for item in &items {
            remove_item(unit, trip.user_id, item)?;
        }
        removed += items.len();
        unit.delete_day(day.id)?;
    }
    unit.delete_trip(trip.id)?;

    info!(
        "Deleted trip {} with {} days and {removed} items",
        trip.id,
        days.len()
    );
    Ok(())
}
