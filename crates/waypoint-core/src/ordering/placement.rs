//! Placing and moving items.

use jiff::civil::Time;
use log::debug;

use super::allocate;
use crate::{
    error::{PlannerError, Result},
    models::{Item, NewItem},
    params::{MoveItem, PlaceItem},
    rank::RankAllocator,
    store::{access, UnitOfWork},
};

pub(super) fn place_item<U: UnitOfWork>(
    unit: &mut U,
    allocator: &RankAllocator,
    params: &PlaceItem,
    scheduled_time: Option<Time>,
) -> Result<Item> {
    let (day, trip) = access::owned_day(unit, params.day_id, params.user_id)?;
    unit.place(params.place_id)?
        .ok_or(PlannerError::PlaceNotFound {
            id: params.place_id,
        })?;

    let siblings = unit.day_items(day.id)?;
    let position = params.position.unwrap_or(siblings.len() as i64);
    let rank = allocate(unit, allocator, &siblings, position)?;

    let item = unit.insert_item(&NewItem {
        day_id: day.id,
        place_id: params.place_id,
        rank,
        scheduled_time,
        duration_minutes: params.duration_minutes,
        notes: params.notes.clone(),
    })?;
    unit.set_saved_place_item(trip.user_id, params.place_id, Some(item.id))?;

    debug!(
        "Placed item {} in day {} at position {position} with rank {rank}",
        item.id, day.id
    );
    Ok(item)
}

pub(super) fn move_item<U: UnitOfWork>(
    unit: &mut U,
    allocator: &RankAllocator,
    params: &MoveItem,
) -> Result<Item> {
    let (mut item, source_day, _) = access::owned_item(unit, params.item_id, params.user_id)?;
    let (target_day, _) = access::owned_day(unit, params.target_day_id, params.user_id)?;
    let same_day = source_day.id == target_day.id;

    let mut siblings = unit.day_items(target_day.id)?;
    let mut position = params.target_position;
    if same_day {
        // The caller sees the list with the moving item still in it
        if let Some(index) = siblings.iter().position(|other| other.id == item.id) {
            siblings.remove(index);
            if position > index as i64 {
                position -= 1;
            }
        }
    }

    let rank = allocate(unit, allocator, &siblings, position)?;
    unit.relocate_item(item.id, target_day.id, rank, !same_day)?;

    debug!(
        "Moved item {} from day {} to day {} with rank {rank}",
        item.id, source_day.id, target_day.id
    );

    item.day_id = target_day.id;
    item.rank = rank;
    if !same_day {
        item.transport_to_next = None;
        item.transport_duration_minutes = None;
    }
    // Reload to pick up the storage-assigned timestamp
    Ok(unit.item(item.id)?.unwrap_or(item))
}
