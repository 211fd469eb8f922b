//! Place pool and saved place queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Place, SavedPlace},
    store::{Repository, UnitOfWork},
};

const INSERT_PLACE_SQL: &str = "INSERT INTO places (name, address, place_type, latitude, longitude, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const PLACE_COLUMNS: &str = "id, name, address, place_type, latitude, longitude, created_at";
const SELECT_PLACE_SQL: &str = "SELECT id, name, address, place_type, latitude, longitude, created_at FROM places WHERE id = ?1";
const CHECK_USER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)";
const INSERT_SAVED_PLACE_SQL: &str = "INSERT INTO saved_places (user_id, place_id, notes, is_placed, current_item_id, saved_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_SAVED_PLACE_SQL: &str = "SELECT sp.id, sp.user_id, sp.place_id, p.name, sp.notes, sp.is_placed, sp.current_item_id, sp.saved_at FROM saved_places sp JOIN places p ON p.id = sp.place_id WHERE sp.user_id = ?1 AND sp.place_id = ?2";
const LIST_SAVED_PLACES_SQL: &str = "SELECT sp.id, sp.user_id, sp.place_id, p.name, sp.notes, sp.is_placed, sp.current_item_id, sp.saved_at FROM saved_places sp JOIN places p ON p.id = sp.place_id WHERE sp.user_id = ?1 ORDER BY sp.id DESC";
pub(super) const UPDATE_SAVED_PLACE_ITEM_SQL: &str =
    "UPDATE saved_places SET is_placed = ?1, current_item_id = ?2 WHERE user_id = ?3 AND place_id = ?4";
const DELETE_SAVED_PLACE_SQL: &str =
    "DELETE FROM saved_places WHERE user_id = ?1 AND place_id = ?2";

pub(super) fn select_place(conn: &Connection, place_id: u64) -> Result<Option<Place>> {
    conn.query_row(
        SELECT_PLACE_SQL,
        params![place_id as i64],
        Database::build_place_from_row,
    )
    .optional()
    .db_context("Failed to query place")
}

pub(super) fn select_saved_place(
    conn: &Connection,
    user_id: u64,
    place_id: u64,
) -> Result<Option<SavedPlace>> {
    conn.query_row(
        SELECT_SAVED_PLACE_SQL,
        params![user_id as i64, place_id as i64],
        Database::build_saved_place_from_row,
    )
    .optional()
    .db_context("Failed to query saved place")
}

/// `LIKE` pattern matching `search` anywhere in the name.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn validate_coordinate(field: &str, value: Option<f64>, limit: f64) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() || v.abs() > limit => Err(PlannerError::invalid_input(field)
            .with_reason(format!("{v} is outside [-{limit}, {limit}]"))),
        _ => Ok(()),
    }
}

impl Database {
    /// Adds a place to the shared pool.
    pub fn create_place(
        &mut self,
        name: &str,
        address: Option<&str>,
        place_type: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Place> {
        if name.trim().is_empty() {
            return Err(PlannerError::invalid_input("name").with_reason("must not be empty"));
        }
        validate_coordinate("latitude", latitude, 90.0)?;
        validate_coordinate("longitude", longitude, 180.0)?;

        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_PLACE_SQL,
                params![
                    name,
                    address,
                    place_type,
                    latitude,
                    longitude,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert place")?;
        let id = self.connection.last_insert_rowid() as u64;
        debug!("Created place {id}");

        Ok(Place {
            id,
            name: name.to_string(),
            address: address.map(String::from),
            place_type: place_type.map(String::from),
            latitude,
            longitude,
            created_at: now,
        })
    }

    pub fn get_place(&self, place_id: u64) -> Result<Place> {
        select_place(&self.connection, place_id)?.ok_or(PlannerError::PlaceNotFound { id: place_id })
    }

    /// Lists places by name, optionally filtered by a case-insensitive name
    /// substring and an exact type.
    ///
    /// Blank filters are ignored.
    pub fn list_places(
        &self,
        search: Option<&str>,
        place_type: Option<&str>,
        limit: u32,
    ) -> Result<Vec<Place>> {
        let mut query = format!("SELECT {PLACE_COLUMNS} FROM places");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            conditions.push("name LIKE ? ESCAPE '\\'");
            params_vec.push(Box::new(like_pattern(search)));
        }
        if let Some(place_type) = place_type.map(str::trim).filter(|t| !t.is_empty()) {
            conditions.push("place_type = ?");
            params_vec.push(Box::new(place_type.to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY name COLLATE NOCASE, id LIMIT ?");
        params_vec.push(Box::new(limit));

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare places query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();
        let places = stmt
            .query_map(&params_refs[..], Self::build_place_from_row)
            .db_context("Failed to list places")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read place row")?;
        Ok(places)
    }

    /// Bookmarks a place for a user.
    ///
    /// If the user already scheduled the place somewhere, the new bookmark
    /// starts out placed and points at the most recent such item.
    pub fn save_place(
        &mut self,
        user_id: u64,
        place_id: u64,
        notes: Option<&str>,
    ) -> Result<SavedPlace> {
        let unit = self.begin()?;

        let user_exists: bool = unit
            .connection()
            .query_row(CHECK_USER_EXISTS_SQL, params![user_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check user existence")?;
        if !user_exists {
            return Err(PlannerError::UserNotFound { id: user_id });
        }
        let place = unit
            .place(place_id)?
            .ok_or(PlannerError::PlaceNotFound { id: place_id })?;
        if unit.saved_place(user_id, place_id)?.is_some() {
            return Err(PlannerError::Conflict {
                message: format!("place {place_id} is already saved by user {user_id}"),
            });
        }

        let current_item_id = unit
            .live_items_for_place(user_id, place_id)?
            .first()
            .map(|item| item.id);
        let now = Timestamp::now();
        unit.connection()
            .execute(
                INSERT_SAVED_PLACE_SQL,
                params![
                    user_id as i64,
                    place_id as i64,
                    notes,
                    current_item_id.is_some(),
                    current_item_id.map(|id| id as i64),
                    now.to_string()
                ],
            )
            .db_context("Failed to save place")?;
        let id = unit.connection().last_insert_rowid() as u64;
        unit.commit()?;
        debug!("User {user_id} saved place {place_id}");

        Ok(SavedPlace {
            id,
            user_id,
            place_id,
            place_name: place.name,
            notes: notes.map(String::from),
            is_placed: current_item_id.is_some(),
            current_item_id,
            saved_at: now,
        })
    }

    pub fn get_saved_place(&self, user_id: u64, place_id: u64) -> Result<SavedPlace> {
        select_saved_place(&self.connection, user_id, place_id)?
            .ok_or(PlannerError::SavedPlaceNotFound { user_id, place_id })
    }

    /// Lists a user's saved places, most recently saved first.
    pub fn list_saved_places(&self, user_id: u64) -> Result<Vec<SavedPlace>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SAVED_PLACES_SQL)
            .db_context("Failed to prepare saved places query")?;
        let saved = stmt
            .query_map(params![user_id as i64], Self::build_saved_place_from_row)
            .db_context("Failed to list saved places")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read saved place row")?;
        Ok(saved)
    }

    /// Removes a bookmark. Items already scheduled stay in place.
    pub fn unsave_place(&mut self, user_id: u64, place_id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(
                DELETE_SAVED_PLACE_SQL,
                params![user_id as i64, place_id as i64],
            )
            .db_context("Failed to delete saved place")?;
        if deleted == 0 {
            return Err(PlannerError::SavedPlaceNotFound { user_id, place_id });
        }
        Ok(())
    }
}
