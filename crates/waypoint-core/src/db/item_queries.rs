//! Itinerary item queries.
//!
//! Rank-changing writes go through the ordering coordinator; this module
//! only carries the reads shared with the unit of work and the metadata
//! update, which never touches rank or day.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Item, UpdateItemRequest},
    store::{access, Repository, UnitOfWork},
};

const SELECT_ITEM_SQL: &str = "SELECT id, day_id, place_id, sort_rank, scheduled_time, duration_minutes, notes, transport_to_next, transport_duration_minutes, created_at, updated_at FROM items WHERE id = ?1";
const SELECT_ITEMS_BY_DAY_SQL: &str = "SELECT id, day_id, place_id, sort_rank, scheduled_time, duration_minutes, notes, transport_to_next, transport_duration_minutes, created_at, updated_at FROM items WHERE day_id = ?1 ORDER BY sort_rank, id";
const SELECT_LIVE_ITEMS_FOR_PLACE_SQL: &str = "SELECT i.id, i.day_id, i.place_id, i.sort_rank, i.scheduled_time, i.duration_minutes, i.notes, i.transport_to_next, i.transport_duration_minutes, i.created_at, i.updated_at FROM items i JOIN days d ON d.id = i.day_id JOIN trips t ON t.id = d.trip_id WHERE i.place_id = ?1 AND t.user_id = ?2 ORDER BY i.id DESC";
pub(super) const INSERT_ITEM_SQL: &str = "INSERT INTO items (day_id, place_id, sort_rank, scheduled_time, duration_minutes, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
pub(super) const RELOCATE_ITEM_SQL: &str =
    "UPDATE items SET day_id = ?1, sort_rank = ?2, updated_at = ?3 WHERE id = ?4";
pub(super) const RELOCATE_ITEM_CLEAR_TRANSPORT_SQL: &str = "UPDATE items SET day_id = ?1, sort_rank = ?2, transport_to_next = NULL, transport_duration_minutes = NULL, updated_at = ?3 WHERE id = ?4";
pub(super) const UPDATE_ITEM_RANK_SQL: &str =
    "UPDATE items SET sort_rank = ?1, updated_at = ?2 WHERE id = ?3";
pub(super) const DELETE_ITEM_SQL: &str = "DELETE FROM items WHERE id = ?1";
const UPDATE_ITEM_DETAILS_SQL: &str = "UPDATE items SET scheduled_time = ?1, duration_minutes = ?2, notes = ?3, transport_to_next = ?4, transport_duration_minutes = ?5, updated_at = ?6 WHERE id = ?7";

pub(super) fn select_item(conn: &Connection, item_id: u64) -> Result<Option<Item>> {
    conn.query_row(
        SELECT_ITEM_SQL,
        params![item_id as i64],
        Database::build_item_from_row,
    )
    .optional()
    .db_context("Failed to query item")
}

pub(super) fn select_day_items(conn: &Connection, day_id: u64) -> Result<Vec<Item>> {
    let mut stmt = conn
        .prepare(SELECT_ITEMS_BY_DAY_SQL)
        .db_context("Failed to prepare items query")?;
    let items = stmt
        .query_map(params![day_id as i64], Database::build_item_from_row)
        .db_context("Failed to query items")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read item row")?;
    Ok(items)
}

pub(super) fn select_live_items_for_place(
    conn: &Connection,
    user_id: u64,
    place_id: u64,
) -> Result<Vec<Item>> {
    let mut stmt = conn
        .prepare(SELECT_LIVE_ITEMS_FOR_PLACE_SQL)
        .db_context("Failed to prepare place items query")?;
    let items = stmt
        .query_map(
            params![place_id as i64, user_id as i64],
            Database::build_item_from_row,
        )
        .db_context("Failed to query place items")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read item row")?;
    Ok(items)
}

impl Database {
    /// Loads one item, checking that the user owns its trip.
    pub fn get_item(&self, user_id: u64, item_id: u64) -> Result<Item> {
        let item = select_item(&self.connection, item_id)?
            .ok_or(PlannerError::ItemNotFound { id: item_id })?;
        let day = super::trip_queries::select_day(&self.connection, item.day_id)?
            .ok_or(PlannerError::DayNotFound { id: item.day_id })?;
        let trip = super::trip_queries::select_trip(&self.connection, day.trip_id)?
            .ok_or(PlannerError::TripNotFound { id: day.trip_id })?;
        if trip.user_id != user_id {
            return Err(PlannerError::forbidden("item", item_id, user_id));
        }
        Ok(item)
    }

    /// Updates an item's scheduling metadata.
    ///
    /// Fields left as `None` in the request keep their current value.
    pub fn update_item(
        &mut self,
        user_id: u64,
        item_id: u64,
        request: &UpdateItemRequest,
    ) -> Result<Item> {
        let mut unit = self.begin()?;
        let (mut item, day, _) = access::owned_item(&unit, item_id, user_id)?;

        if let Some(time) = request.scheduled_time {
            item.scheduled_time = Some(time);
        }
        if let Some(minutes) = request.duration_minutes {
            item.duration_minutes = Some(minutes);
        }
        if let Some(notes) = &request.notes {
            item.notes = Some(notes.clone());
        }
        if let Some(mode) = request.transport_to_next {
            item.transport_to_next = Some(mode);
        }
        if let Some(minutes) = request.transport_duration_minutes {
            item.transport_duration_minutes = Some(minutes);
        }
        item.updated_at = Timestamp::now();

        unit.connection()
            .execute(
                UPDATE_ITEM_DETAILS_SQL,
                params![
                    item.scheduled_time.map(|t| t.to_string()),
                    item.duration_minutes,
                    item.notes.as_deref(),
                    item.transport_to_next.map(|m| m.as_str()),
                    item.transport_duration_minutes,
                    item.updated_at.to_string(),
                    item_id as i64
                ],
            )
            .db_context("Failed to update item")?;
        unit.touch_trip(day.trip_id)?;
        unit.commit()?;
        debug!("Updated item {item_id}");

        Ok(item)
    }
}
