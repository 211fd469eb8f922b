//! Storage seam used by the ordering coordinator.
//!
//! A [`Repository`] hands out a [`UnitOfWork`]: a transactional view in
//! which every read observes the unit's own earlier writes and nothing is
//! visible to other readers until [`UnitOfWork::commit`]. Dropping or
//! rolling back a unit discards all of its writes.
//!
//! Two backends implement the seam: [`crate::db::Database`] on SQLite, and
//! [`MemoryStore`] for tests and embedding.

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{Day, Item, NewItem, Place, SavedPlace, Trip},
    rank::Rank,
};

pub(crate) mod access;
pub mod memory;

pub use memory::MemoryStore;

/// Source of units of work.
pub trait Repository {
    type Unit<'a>: UnitOfWork
    where
        Self: 'a;

    /// Opens a new unit of work.
    fn begin(&mut self) -> Result<Self::Unit<'_>>;
}

/// Reads and writes performed inside one transaction.
///
/// Lookups return `Ok(None)` for absent rows; deciding which error to raise
/// is left to the caller. Loaded trips and days come without their nested
/// children.
pub trait UnitOfWork {
    fn trip(&self, trip_id: u64) -> Result<Option<Trip>>;

    fn day(&self, day_id: u64) -> Result<Option<Day>>;

    fn item(&self, item_id: u64) -> Result<Option<Item>>;

    fn place(&self, place_id: u64) -> Result<Option<Place>>;

    /// Items of a day in display order (rank, then id).
    fn day_items(&self, day_id: u64) -> Result<Vec<Item>>;

    /// Days of a trip ordered by day number.
    fn trip_days(&self, trip_id: u64) -> Result<Vec<Day>>;

    fn saved_place(&self, user_id: u64, place_id: u64) -> Result<Option<SavedPlace>>;

    /// Items of `place_id` in any trip owned by `user_id`, most recently
    /// created (highest id) first.
    fn live_items_for_place(&self, user_id: u64, place_id: u64) -> Result<Vec<Item>>;

    fn insert_item(&mut self, item: &NewItem) -> Result<Item>;

    /// Moves an item to `day_id` at `rank`, optionally clearing its transport
    /// link fields.
    fn relocate_item(
        &mut self,
        item_id: u64,
        day_id: u64,
        rank: Rank,
        clear_transport: bool,
    ) -> Result<()>;

    fn set_item_rank(&mut self, item_id: u64, rank: Rank) -> Result<()>;

    fn delete_item(&mut self, item_id: u64) -> Result<()>;

    /// Points the user's saved place at `item_id`, or clears it for `None`.
    ///
    /// `is_placed` follows the presence of `item_id`. Returns `false` when
    /// the user never saved the place, in which case nothing is written.
    fn set_saved_place_item(
        &mut self,
        user_id: u64,
        place_id: u64,
        item_id: Option<u64>,
    ) -> Result<bool>;

    /// Writes a day's number and date. Uniqueness of `(trip, day_number)` is
    /// checked on every call.
    fn set_day_number(&mut self, day_id: u64, day_number: i64, date: Option<Date>) -> Result<()>;

    /// Deletes a day row. The day must no longer hold any items.
    fn delete_day(&mut self, day_id: u64) -> Result<()>;

    /// Deletes a trip row. The trip must no longer hold any days.
    fn delete_trip(&mut self, trip_id: u64) -> Result<()>;

    /// Bumps the trip's `updated_at`.
    fn touch_trip(&mut self, trip_id: u64) -> Result<()>;

    fn commit(self) -> Result<()>
    where
        Self: Sized;

    fn rollback(self) -> Result<()>
    where
        Self: Sized;
}
