//! User, trip and day queries.

use jiff::{civil::Date, Timestamp};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{trip::date_for_day, Day, Trip, TripSummary, UpdateTripRequest, User},
    store::{access, Repository, UnitOfWork},
};

const INSERT_USER_SQL: &str = "INSERT INTO users (username, created_at) VALUES (?1, ?2)";
const SELECT_USER_SQL: &str = "SELECT id, username, created_at FROM users WHERE id = ?1";
const CHECK_USER_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)";
const INSERT_TRIP_SQL: &str = "INSERT INTO trips (user_id, name, destination, start_date, end_date, archived, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7)";
const SELECT_TRIP_SQL: &str = "SELECT id, user_id, name, destination, start_date, end_date, archived, created_at, updated_at FROM trips WHERE id = ?1";
const LIST_TRIPS_SQL: &str = "SELECT t.id, t.name, t.destination, t.start_date, t.end_date, t.archived, t.created_at, (SELECT COUNT(*) FROM days d WHERE d.trip_id = t.id), (SELECT COUNT(*) FROM items i JOIN days d ON d.id = i.day_id WHERE d.trip_id = t.id) FROM trips t WHERE t.user_id = ?1 AND t.archived = ?2 ORDER BY t.id DESC";
const UPDATE_TRIP_SQL: &str = "UPDATE trips SET name = ?1, destination = ?2, start_date = ?3, end_date = ?4, archived = ?5, updated_at = ?6 WHERE id = ?7";
pub(super) const DELETE_TRIP_SQL: &str = "DELETE FROM trips WHERE id = ?1";
pub(super) const UPDATE_TRIP_TIMESTAMP_SQL: &str = "UPDATE trips SET updated_at = ?1 WHERE id = ?2";
const SELECT_DAY_SQL: &str = "SELECT id, trip_id, day_number, date, notes FROM days WHERE id = ?1";
const SELECT_DAYS_BY_TRIP_SQL: &str =
    "SELECT id, trip_id, day_number, date, notes FROM days WHERE trip_id = ?1 ORDER BY day_number";
const INSERT_DAY_SQL: &str =
    "INSERT INTO days (trip_id, day_number, date, notes) VALUES (?1, ?2, ?3, ?4)";
pub(super) const UPDATE_DAY_NUMBER_SQL: &str =
    "UPDATE days SET day_number = ?1, date = ?2 WHERE id = ?3";
pub(super) const DELETE_DAY_SQL: &str = "DELETE FROM days WHERE id = ?1";

pub(super) fn select_trip(conn: &Connection, trip_id: u64) -> Result<Option<Trip>> {
    conn.query_row(
        SELECT_TRIP_SQL,
        params![trip_id as i64],
        Database::build_trip_from_row,
    )
    .optional()
    .db_context("Failed to query trip")
}

pub(super) fn select_day(conn: &Connection, day_id: u64) -> Result<Option<Day>> {
    conn.query_row(SELECT_DAY_SQL, params![day_id as i64], Database::build_day_from_row)
        .optional()
        .db_context("Failed to query day")
}

pub(super) fn select_trip_days(conn: &Connection, trip_id: u64) -> Result<Vec<Day>> {
    let mut stmt = conn
        .prepare(SELECT_DAYS_BY_TRIP_SQL)
        .db_context("Failed to prepare days query")?;
    let days = stmt
        .query_map(params![trip_id as i64], Database::build_day_from_row)
        .db_context("Failed to query days")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read day row")?;
    Ok(days)
}

fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(())
}

impl Database {
    /// Registers a user. Usernames are unique.
    pub fn create_user(&mut self, username: &str) -> Result<User> {
        validate_name("username", username)?;
        let now = Timestamp::now();

        self.connection
            .execute(INSERT_USER_SQL, params![username.trim(), now.to_string()])
            .db_context("Failed to insert user")?;
        let id = self.connection.last_insert_rowid() as u64;
        debug!("Created user {id}");

        Ok(User {
            id,
            username: username.trim().to_string(),
            created_at: now,
        })
    }

    pub fn get_user(&self, user_id: u64) -> Result<User> {
        self.connection
            .query_row(
                SELECT_USER_SQL,
                params![user_id as i64],
                Self::build_user_from_row,
            )
            .optional()
            .db_context("Failed to query user")?
            .ok_or(PlannerError::UserNotFound { id: user_id })
    }

    /// Creates a trip owned by `user_id`.
    pub fn create_trip(
        &mut self,
        user_id: u64,
        name: &str,
        destination: Option<&str>,
        start_date: Option<Date>,
        end_date: Option<Date>,
    ) -> Result<Trip> {
        validate_name("name", name)?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                return Err(PlannerError::invalid_input("end_date")
                    .with_reason(format!("{end} is before start date {start}")));
            }
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let user_exists: bool = tx
            .query_row(CHECK_USER_EXISTS_SQL, params![user_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check user existence")?;
        if !user_exists {
            return Err(PlannerError::UserNotFound { id: user_id });
        }

        let now = Timestamp::now();
        let now_str = now.to_string();
        tx.execute(
            INSERT_TRIP_SQL,
            params![
                user_id as i64,
                name,
                destination,
                start_date.map(|d| d.to_string()),
                end_date.map(|d| d.to_string()),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert trip")?;
        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;
        debug!("Created trip {id} for user {user_id}");

        Ok(Trip {
            id,
            user_id,
            name: name.to_string(),
            destination: destination.map(String::from),
            start_date,
            end_date,
            archived: false,
            created_at: now,
            updated_at: now,
            days: vec![],
        })
    }

    /// Lists a user's active or archived trips, newest first.
    pub fn list_trips(&self, user_id: u64, archived: bool) -> Result<Vec<TripSummary>> {
        let mut stmt = self
            .connection
            .prepare(LIST_TRIPS_SQL)
            .db_context("Failed to prepare trip listing")?;

        let summaries = stmt
            .query_map(
                params![user_id as i64, archived],
                Self::build_trip_summary_from_row,
            )
            .db_context("Failed to list trips")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read trip row")?;

        Ok(summaries)
    }

    /// Loads a trip with its days and each day's items in display order.
    pub fn get_trip(&self, user_id: u64, trip_id: u64) -> Result<Trip> {
        let mut trip = select_trip(&self.connection, trip_id)?
            .ok_or(PlannerError::TripNotFound { id: trip_id })?;
        if trip.user_id != user_id {
            return Err(PlannerError::forbidden("trip", trip_id, user_id));
        }

        let mut days = select_trip_days(&self.connection, trip_id)?;
        for day in &mut days {
            day.items = super::item_queries::select_day_items(&self.connection, day.id)?;
        }
        trip.days = days;
        Ok(trip)
    }

    /// Loads one day with its items in display order.
    pub fn get_day(&self, user_id: u64, day_id: u64) -> Result<Day> {
        let mut day =
            select_day(&self.connection, day_id)?.ok_or(PlannerError::DayNotFound { id: day_id })?;
        let trip = select_trip(&self.connection, day.trip_id)?
            .ok_or(PlannerError::TripNotFound { id: day.trip_id })?;
        if trip.user_id != user_id {
            return Err(PlannerError::forbidden("day", day_id, user_id));
        }

        day.items = super::item_queries::select_day_items(&self.connection, day_id)?;
        Ok(day)
    }

    /// Applies the provided changes to a trip.
    ///
    /// A changed start date re-dates every day as `start + (day_number - 1)`.
    /// The returned trip comes without its days.
    pub fn update_trip(
        &mut self,
        user_id: u64,
        trip_id: u64,
        request: &UpdateTripRequest,
    ) -> Result<Trip> {
        let mut unit = self.begin()?;
        let mut trip = access::owned_trip(&unit, trip_id, user_id)?;

        if let Some(name) = &request.name {
            trip.name.clone_from(name);
        }
        if let Some(destination) = &request.destination {
            trip.destination = Some(destination.clone());
        }
        if let Some(end) = request.end_date {
            trip.end_date = Some(end);
        }
        if let Some(archived) = request.archived {
            trip.archived = archived;
        }
        let redate = request.start_date.is_some() && request.start_date != trip.start_date;
        if let Some(start) = request.start_date {
            trip.start_date = Some(start);
        }
        if let (Some(start), Some(end)) = (trip.start_date, trip.end_date) {
            if end < start {
                return Err(PlannerError::invalid_input("end_date")
                    .with_reason(format!("{end} is before start date {start}")));
            }
        }
        trip.updated_at = Timestamp::now();

        unit.connection()
            .execute(
                UPDATE_TRIP_SQL,
                params![
                    trip.name,
                    trip.destination,
                    trip.start_date.map(|d| d.to_string()),
                    trip.end_date.map(|d| d.to_string()),
                    trip.archived,
                    trip.updated_at.to_string(),
                    trip_id as i64
                ],
            )
            .db_context("Failed to update trip")?;

        if redate {
            for day in unit.trip_days(trip_id)? {
                let date = date_for_day(trip.start_date, day.day_number)?;
                unit.set_day_number(day.id, day.day_number, date)?;
            }
        }
        unit.commit()?;
        debug!("Updated trip {trip_id}");

        Ok(trip)
    }

    /// Appends a day after the trip's last day.
    ///
    /// The new day's date follows the trip's start date when it has one.
    pub fn append_day(&mut self, user_id: u64, trip_id: u64, notes: Option<&str>) -> Result<Day> {
        let mut unit = self.begin()?;
        let trip = access::owned_trip(&unit, trip_id, user_id)?;

        let day_number = unit
            .trip_days(trip_id)?
            .last()
            .map_or(1, |day| day.day_number + 1);
        let date = date_for_day(trip.start_date, day_number)?;

        unit.connection()
            .execute(
                INSERT_DAY_SQL,
                params![
                    trip_id as i64,
                    day_number,
                    date.map(|d| d.to_string()),
                    notes
                ],
            )
            .db_context("Failed to insert day")?;
        let id = unit.connection().last_insert_rowid() as u64;
        unit.touch_trip(trip_id)?;
        unit.commit()?;
        debug!("Appended day {day_number} (id {id}) to trip {trip_id}");

        Ok(Day {
            id,
            trip_id,
            day_number,
            date,
            notes: notes.map(String::from),
            items: vec![],
        })
    }
}
