//! Row decoding shared by the query modules and the unit of work.

use std::str::FromStr;

use rusqlite::{types::Type, Row};

use crate::{
    models::{Day, Item, Place, SavedPlace, Trip, TripSummary, User},
    rank::Rank,
};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Parses a TEXT column into `T`.
fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
}

/// Parses a nullable TEXT column into `Option<T>`.
fn parse_optional_column<T>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into()))
    })
    .transpose()
}

impl super::Database {
    /// Columns: id, username, created_at
    pub(super) fn build_user_from_row(row: &Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get::<_, i64>(0)? as u64,
            username: row.get(1)?,
            created_at: parse_column(row, 2)?,
        })
    }

    /// Columns: id, user_id, name, destination, start_date, end_date,
    /// archived, created_at, updated_at
    pub(super) fn build_trip_from_row(row: &Row) -> rusqlite::Result<Trip> {
        Ok(Trip {
            id: row.get::<_, i64>(0)? as u64,
            user_id: row.get::<_, i64>(1)? as u64,
            name: row.get(2)?,
            destination: row.get(3)?,
            start_date: parse_optional_column(row, 4)?,
            end_date: parse_optional_column(row, 5)?,
            archived: row.get(6)?,
            created_at: parse_column(row, 7)?,
            updated_at: parse_column(row, 8)?,
            days: vec![],
        })
    }

    /// Columns: id, name, destination, start_date, end_date, archived,
    /// created_at, day count, item count
    pub(super) fn build_trip_summary_from_row(row: &Row) -> rusqlite::Result<TripSummary> {
        Ok(TripSummary {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            destination: row.get(2)?,
            start_date: parse_optional_column(row, 3)?,
            end_date: parse_optional_column(row, 4)?,
            archived: row.get(5)?,
            created_at: parse_column(row, 6)?,
            total_days: row.get(7)?,
            total_items: row.get(8)?,
        })
    }

    /// Columns: id, trip_id, day_number, date, notes
    pub(super) fn build_day_from_row(row: &Row) -> rusqlite::Result<Day> {
        Ok(Day {
            id: row.get::<_, i64>(0)? as u64,
            trip_id: row.get::<_, i64>(1)? as u64,
            day_number: row.get(2)?,
            date: parse_optional_column(row, 3)?,
            notes: row.get(4)?,
            items: vec![],
        })
    }

    /// Columns: id, day_id, place_id, sort_rank, scheduled_time,
    /// duration_minutes, notes, transport_to_next,
    /// transport_duration_minutes, created_at, updated_at
    pub(super) fn build_item_from_row(row: &Row) -> rusqlite::Result<Item> {
        Ok(Item {
            id: row.get::<_, i64>(0)? as u64,
            day_id: row.get::<_, i64>(1)? as u64,
            place_id: row.get::<_, i64>(2)? as u64,
            rank: Rank::from_units(row.get(3)?),
            scheduled_time: parse_optional_column(row, 4)?,
            duration_minutes: row.get(5)?,
            notes: row.get(6)?,
            transport_to_next: parse_optional_column(row, 7)?,
            transport_duration_minutes: row.get(8)?,
            created_at: parse_column(row, 9)?,
            updated_at: parse_column(row, 10)?,
        })
    }

    /// Columns: id, name, address, place_type, latitude, longitude, created_at
    pub(super) fn build_place_from_row(row: &Row) -> rusqlite::Result<Place> {
        Ok(Place {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            address: row.get(2)?,
            place_type: row.get(3)?,
            latitude: row.get(4)?,
            longitude: row.get(5)?,
            created_at: parse_column(row, 6)?,
        })
    }

    /// Columns: id, user_id, place_id, place name, notes, is_placed,
    /// current_item_id, saved_at
    pub(super) fn build_saved_place_from_row(row: &Row) -> rusqlite::Result<SavedPlace> {
        Ok(SavedPlace {
            id: row.get::<_, i64>(0)? as u64,
            user_id: row.get::<_, i64>(1)? as u64,
            place_id: row.get::<_, i64>(2)? as u64,
            place_name: row.get(3)?,
            notes: row.get(4)?,
            is_placed: row.get(5)?,
            current_item_id: row.get::<_, Option<i64>>(6)?.map(|id| id as u64),
            saved_at: parse_column(row, 7)?,
        })
    }
}
