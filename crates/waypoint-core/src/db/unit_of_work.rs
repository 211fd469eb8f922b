//! SQLite implementation of the unit-of-work seam.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, Connection, Transaction};

use super::{item_queries, place_queries, trip_queries, Database};
use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Day, Item, NewItem, Place, SavedPlace, Trip},
    rank::Rank,
    store::{Repository, UnitOfWork},
};

impl Repository for Database {
    type Unit<'a> = SqliteUnit<'a>;

    fn begin(&mut self) -> Result<Self::Unit<'_>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        Ok(SqliteUnit { tx })
    }
}

/// One SQLite transaction. Dropping it without commit rolls back.
pub struct SqliteUnit<'a> {
    tx: Transaction<'a>,
}

impl SqliteUnit<'_> {
    /// The connection the transaction runs on.
    pub(super) fn connection(&self) -> &Connection {
        &self.tx
    }

    fn expect_one_row(changed: usize, missing: PlannerError) -> Result<()> {
        if changed == 0 {
            return Err(missing);
        }
        Ok(())
    }
}

impl UnitOfWork for SqliteUnit<'_> {
    fn trip(&self, trip_id: u64) -> Result<Option<Trip>> {
        trip_queries::select_trip(&self.tx, trip_id)
    }

    fn day(&self, day_id: u64) -> Result<Option<Day>> {
        trip_queries::select_day(&self.tx, day_id)
    }

    fn item(&self, item_id: u64) -> Result<Option<Item>> {
        item_queries::select_item(&self.tx, item_id)
    }

    fn place(&self, place_id: u64) -> Result<Option<Place>> {
        place_queries::select_place(&self.tx, place_id)
    }

    fn day_items(&self, day_id: u64) -> Result<Vec<Item>> {
        item_queries::select_day_items(&self.tx, day_id)
    }

    fn trip_days(&self, trip_id: u64) -> Result<Vec<Day>> {
        trip_queries::select_trip_days(&self.tx, trip_id)
    }

    fn saved_place(&self, user_id: u64, place_id: u64) -> Result<Option<SavedPlace>> {
        place_queries::select_saved_place(&self.tx, user_id, place_id)
    }

    fn live_items_for_place(&self, user_id: u64, place_id: u64) -> Result<Vec<Item>> {
        item_queries::select_live_items_for_place(&self.tx, user_id, place_id)
    }

    fn insert_item(&mut self, item: &NewItem) -> Result<Item> {
        let now = Timestamp::now();
        let now_str = now.to_string();
        self.tx
            .execute(
                item_queries::INSERT_ITEM_SQL,
                params![
                    item.day_id as i64,
                    item.place_id as i64,
                    item.rank.units(),
                    item.scheduled_time.map(|t| t.to_string()),
                    item.duration_minutes,
                    item.notes.as_deref(),
                    &now_str,
                    &now_str
                ],
            )
            .db_context("Failed to insert item")?;

        Ok(Item {
            id: self.tx.last_insert_rowid() as u64,
            day_id: item.day_id,
            place_id: item.place_id,
            rank: item.rank,
            scheduled_time: item.scheduled_time,
            duration_minutes: item.duration_minutes,
            notes: item.notes.clone(),
            transport_to_next: None,
            transport_duration_minutes: None,
            created_at: now,
            updated_at: now,
        })
    }

    fn relocate_item(
        &mut self,
        item_id: u64,
        day_id: u64,
        rank: Rank,
        clear_transport: bool,
    ) -> Result<()> {
        let sql = if clear_transport {
            item_queries::RELOCATE_ITEM_CLEAR_TRANSPORT_SQL
        } else {
            item_queries::RELOCATE_ITEM_SQL
        };
        let changed = self
            .tx
            .execute(
                sql,
                params![
                    day_id as i64,
                    rank.units(),
                    Timestamp::now().to_string(),
                    item_id as i64
                ],
            )
            .db_context("Failed to move item")?;
        Self::expect_one_row(changed, PlannerError::ItemNotFound { id: item_id })
    }

    fn set_item_rank(&mut self, item_id: u64, rank: Rank) -> Result<()> {
        let changed = self
            .tx
            .execute(
                item_queries::UPDATE_ITEM_RANK_SQL,
                params![rank.units(), Timestamp::now().to_string(), item_id as i64],
            )
            .db_context("Failed to update item rank")?;
        Self::expect_one_row(changed, PlannerError::ItemNotFound { id: item_id })
    }

    fn delete_item(&mut self, item_id: u64) -> Result<()> {
        let changed = self
            .tx
            .execute(item_queries::DELETE_ITEM_SQL, params![item_id as i64])
            .db_context("Failed to delete item")?;
        Self::expect_one_row(changed, PlannerError::ItemNotFound { id: item_id })
    }

    fn set_saved_place_item(
        &mut self,
        user_id: u64,
        place_id: u64,
        item_id: Option<u64>,
    ) -> Result<bool> {
        let changed = self
            .tx
            .execute(
                place_queries::UPDATE_SAVED_PLACE_ITEM_SQL,
                params![
                    item_id.is_some(),
                    item_id.map(|id| id as i64),
                    user_id as i64,
                    place_id as i64
                ],
            )
            .db_context("Failed to update saved place")?;
        Ok(changed > 0)
    }

    fn set_day_number(&mut self, day_id: u64, day_number: i64, date: Option<Date>) -> Result<()> {
        let changed = self
            .tx
            .execute(
                trip_queries::UPDATE_DAY_NUMBER_SQL,
                params![day_number, date.map(|d| d.to_string()), day_id as i64],
            )
            .db_context("Failed to renumber day")?;
        Self::expect_one_row(changed, PlannerError::DayNotFound { id: day_id })
    }

    fn delete_day(&mut self, day_id: u64) -> Result<()> {
        let changed = self
            .tx
            .execute(trip_queries::DELETE_DAY_SQL, params![day_id as i64])
            .db_context("Failed to delete day")?;
        Self::expect_one_row(changed, PlannerError::DayNotFound { id: day_id })
    }

    fn delete_trip(&mut self, trip_id: u64) -> Result<()> {
        let changed = self
            .tx
            .execute(trip_queries::DELETE_TRIP_SQL, params![trip_id as i64])
            .db_context("Failed to delete trip")?;
        Self::expect_one_row(changed, PlannerError::TripNotFound { id: trip_id })
    }

    fn touch_trip(&mut self, trip_id: u64) -> Result<()> {
        let changed = self
            .tx
            .execute(
                trip_queries::UPDATE_TRIP_TIMESTAMP_SQL,
                params![Timestamp::now().to_string(), trip_id as i64],
            )
            .db_context("Failed to update trip timestamp")?;
        Self::expect_one_row(changed, PlannerError::TripNotFound { id: trip_id })
    }

    fn commit(self) -> Result<()> {
        self.tx.commit().db_context("Failed to commit transaction")
    }

    fn rollback(self) -> Result<()> {
        self.tx
            .rollback()
            .db_context("Failed to roll back transaction")
    }
}
