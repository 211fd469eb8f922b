//! In-memory repository.
//!
//! A unit of work operates on a private copy of all tables which replaces
//! the store's tables on commit. Constraints the SQLite schema declares are
//! checked eagerly on every write, so a sequence of writes that would trip
//! `UNIQUE(trip_id, day_number)` in SQLite fails here at the same step.

use std::collections::BTreeMap;

use jiff::{civil::Date, Timestamp};
use log::debug;

use super::{Repository, UnitOfWork};
use crate::{
    error::{PlannerError, Result},
    models::{
        trip::date_for_day, Day, Item, NewItem, Place, SavedPlace, Trip, UpdateItemRequest, User,
    },
    rank::Rank,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    last_id: u64,
    users: BTreeMap<u64, User>,
    trips: BTreeMap<u64, Trip>,
    days: BTreeMap<u64, Day>,
    places: BTreeMap<u64, Place>,
    items: BTreeMap<u64, Item>,
    saved_places: BTreeMap<u64, SavedPlace>,
}

impl Tables {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn day_items(&self, day_id: u64) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .items
            .values()
            .filter(|item| item.day_id == day_id)
            .cloned()
            .collect();
        items.sort_by_key(|item| (item.rank, item.id));
        items
    }

    fn trip_days(&self, trip_id: u64) -> Vec<Day> {
        let mut days: Vec<Day> = self
            .days
            .values()
            .filter(|day| day.trip_id == trip_id)
            .cloned()
            .collect();
        days.sort_by_key(|day| day.day_number);
        days
    }

    fn saved_place(&self, user_id: u64, place_id: u64) -> Option<&SavedPlace> {
        self.saved_places
            .values()
            .find(|saved| saved.user_id == user_id && saved.place_id == place_id)
    }

    fn owner_of_day(&self, day_id: u64) -> Option<u64> {
        let day = self.days.get(&day_id)?;
        self.trips.get(&day.trip_id).map(|trip| trip.user_id)
    }

    fn check_day_number_free(&self, day_id: u64, trip_id: u64, day_number: i64) -> Result<()> {
        let taken = self
            .days
            .values()
            .any(|day| day.id != day_id && day.trip_id == trip_id && day.day_number == day_number);
        if taken {
            return Err(PlannerError::Conflict {
                message: format!("day number {day_number} already exists in trip {trip_id}"),
            });
        }
        Ok(())
    }
}

/// Repository holding every table in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
    fail_after_writes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next unit of work fail on the write following the first
    /// `writes` successful ones.
    pub fn inject_failure_after(&mut self, writes: usize) {
        self.fail_after_writes = Some(writes);
    }

    pub fn create_user(&mut self, username: &str) -> User {
        let id = self.tables.next_id();
        let user = User {
            id,
            username: username.to_string(),
            created_at: Timestamp::now(),
        };
        self.tables.users.insert(id, user.clone());
        user
    }

    pub fn create_trip(&mut self, user_id: u64, name: &str, start_date: Option<Date>) -> Trip {
        let id = self.tables.next_id();
        let now = Timestamp::now();
        let trip = Trip {
            id,
            user_id,
            name: name.to_string(),
            destination: None,
            start_date,
            end_date: None,
            archived: false,
            created_at: now,
            updated_at: now,
            days: vec![],
        };
        self.tables.trips.insert(id, trip.clone());
        trip
    }

    /// Appends a day numbered after the trip's last day.
    pub fn append_day(&mut self, trip_id: u64) -> Result<Day> {
        let trip = self
            .tables
            .trips
            .get(&trip_id)
            .ok_or(PlannerError::TripNotFound { id: trip_id })?;
        let day_number = self
            .tables
            .trip_days(trip_id)
            .last()
            .map_or(1, |day| day.day_number + 1);
        let date = date_for_day(trip.start_date, day_number)?;

        let id = self.tables.next_id();
        let day = Day {
            id,
            trip_id,
            day_number,
            date,
            notes: None,
            items: vec![],
        };
        self.tables.days.insert(id, day.clone());
        Ok(day)
    }

    /// Overrides a day's stored date.
    pub fn set_day_date(&mut self, day_id: u64, date: Option<Date>) -> Result<()> {
        let day = self
            .tables
            .days
            .get_mut(&day_id)
            .ok_or(PlannerError::DayNotFound { id: day_id })?;
        day.date = date;
        Ok(())
    }

    pub fn create_place(&mut self, name: &str) -> Place {
        let id = self.tables.next_id();
        let place = Place {
            id,
            name: name.to_string(),
            address: None,
            place_type: None,
            latitude: None,
            longitude: None,
            created_at: Timestamp::now(),
        };
        self.tables.places.insert(id, place.clone());
        place
    }

    pub fn save_place(&mut self, user_id: u64, place_id: u64) -> Result<SavedPlace> {
        let place = self
            .tables
            .places
            .get(&place_id)
            .ok_or(PlannerError::PlaceNotFound { id: place_id })?;
        if self.tables.saved_place(user_id, place_id).is_some() {
            return Err(PlannerError::Conflict {
                message: format!("place {place_id} already saved by user {user_id}"),
            });
        }
        let place_name = place.name.clone();
        let current_item_id = self
            .tables
            .items
            .values()
            .filter(|item| {
                item.place_id == place_id && self.tables.owner_of_day(item.day_id) == Some(user_id)
            })
            .map(|item| item.id)
            .max();

        let id = self.tables.next_id();
        let saved = SavedPlace {
            id,
            user_id,
            place_id,
            place_name,
            notes: None,
            is_placed: current_item_id.is_some(),
            current_item_id,
            saved_at: Timestamp::now(),
        };
        self.tables.saved_places.insert(id, saved.clone());
        Ok(saved)
    }

    /// Inserts an item at an explicit rank, bypassing the allocator.
    pub fn seed_item(&mut self, day_id: u64, place_id: u64, rank: Rank) -> Result<Item> {
        let mut unit = self.begin()?;
        let item = unit.insert_item(&NewItem {
            day_id,
            place_id,
            rank,
            scheduled_time: None,
            duration_minutes: None,
            notes: None,
        })?;
        unit.commit()?;
        Ok(item)
    }

    /// Applies scheduling changes to an item, like
    /// [`Database::update_item`](crate::Database::update_item) without the
    /// ownership check.
    pub fn update_item(&mut self, item_id: u64, request: &UpdateItemRequest) -> Result<Item> {
        let item = self
            .tables
            .items
            .get_mut(&item_id)
            .ok_or(PlannerError::ItemNotFound { id: item_id })?;
        if request.scheduled_time.is_some() {
            item.scheduled_time = request.scheduled_time;
        }
        if request.duration_minutes.is_some() {
            item.duration_minutes = request.duration_minutes;
        }
        if request.notes.is_some() {
            item.notes.clone_from(&request.notes);
        }
        if request.transport_to_next.is_some() {
            item.transport_to_next = request.transport_to_next;
        }
        if request.transport_duration_minutes.is_some() {
            item.transport_duration_minutes = request.transport_duration_minutes;
        }
        item.updated_at = Timestamp::now();
        Ok(item.clone())
    }

    pub fn trip(&self, trip_id: u64) -> Option<&Trip> {
        self.tables.trips.get(&trip_id)
    }

    pub fn item(&self, item_id: u64) -> Option<&Item> {
        self.tables.items.get(&item_id)
    }

    pub fn day(&self, day_id: u64) -> Option<&Day> {
        self.tables.days.get(&day_id)
    }

    pub fn day_items(&self, day_id: u64) -> Vec<Item> {
        self.tables.day_items(day_id)
    }

    pub fn trip_days(&self, trip_id: u64) -> Vec<Day> {
        self.tables.trip_days(trip_id)
    }

    pub fn saved_place(&self, user_id: u64, place_id: u64) -> Option<&SavedPlace> {
        self.tables.saved_place(user_id, place_id)
    }

    pub fn item_count(&self) -> usize {
        self.tables.items.len()
    }
}

impl Repository for MemoryStore {
    type Unit<'a> = MemoryUnit<'a>;

    fn begin(&mut self) -> Result<Self::Unit<'_>> {
        let fail_after_writes = self.fail_after_writes.take();
        Ok(MemoryUnit {
            working: self.tables.clone(),
            store: self,
            writes: 0,
            fail_after_writes,
        })
    }
}

/// Unit of work over a [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryUnit<'a> {
    store: &'a mut MemoryStore,
    working: Tables,
    writes: usize,
    fail_after_writes: Option<usize>,
}

impl MemoryUnit<'_> {
    fn record_write(&mut self, operation: &str) -> Result<()> {
        if self.fail_after_writes == Some(self.writes) {
            return Err(PlannerError::Conflict {
                message: format!("injected failure during {operation}"),
            });
        }
        self.writes += 1;
        Ok(())
    }

    fn item_mut(&mut self, item_id: u64) -> Result<&mut Item> {
        self.working
            .items
            .get_mut(&item_id)
            .ok_or(PlannerError::ItemNotFound { id: item_id })
    }
}

impl UnitOfWork for MemoryUnit<'_> {
    fn trip(&self, trip_id: u64) -> Result<Option<Trip>> {
        Ok(self.working.trips.get(&trip_id).cloned())
    }

    fn day(&self, day_id: u64) -> Result<Option<Day>> {
        Ok(self.working.days.get(&day_id).cloned())
    }

    fn item(&self, item_id: u64) -> Result<Option<Item>> {
        Ok(self.working.items.get(&item_id).cloned())
    }

    fn place(&self, place_id: u64) -> Result<Option<Place>> {
        Ok(self.working.places.get(&place_id).cloned())
    }

    fn day_items(&self, day_id: u64) -> Result<Vec<Item>> {
        Ok(self.working.day_items(day_id))
    }

    fn trip_days(&self, trip_id: u64) -> Result<Vec<Day>> {
        Ok(self.working.trip_days(trip_id))
    }

    fn saved_place(&self, user_id: u64, place_id: u64) -> Result<Option<SavedPlace>> {
        Ok(self.working.saved_place(user_id, place_id).cloned())
    }

    fn live_items_for_place(&self, user_id: u64, place_id: u64) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self
            .working
            .items
            .values()
            .filter(|item| {
                item.place_id == place_id && self.working.owner_of_day(item.day_id) == Some(user_id)
            })
            .cloned()
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(items)
    }

    fn insert_item(&mut self, item: &NewItem) -> Result<Item> {
        self.record_write("insert_item")?;
        if !self.working.days.contains_key(&item.day_id) {
            return Err(PlannerError::DayNotFound { id: item.day_id });
        }
        if !self.working.places.contains_key(&item.place_id) {
            return Err(PlannerError::PlaceNotFound { id: item.place_id });
        }

        let id = self.working.next_id();
        let now = Timestamp::now();
        let created = Item {
            id,
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
        };
        self.working.items.insert(id, created.clone());
        debug!("memory: inserted item {id} into day {}", item.day_id);
        Ok(created)
    }

    fn relocate_item(
        &mut self,
        item_id: u64,
        day_id: u64,
        rank: Rank,
        clear_transport: bool,
    ) -> Result<()> {
        self.record_write("relocate_item")?;
        if !self.working.days.contains_key(&day_id) {
            return Err(PlannerError::DayNotFound { id: day_id });
        }
        let item = self.item_mut(item_id)?;
        item.day_id = day_id;
        item.rank = rank;
        if clear_transport {
            item.transport_to_next = None;
            item.transport_duration_minutes = None;
        }
        item.updated_at = Timestamp::now();
        Ok(())
    }

    fn set_item_rank(&mut self, item_id: u64, rank: Rank) -> Result<()> {
        self.record_write("set_item_rank")?;
        let item = self.item_mut(item_id)?;
        item.rank = rank;
        item.updated_at = Timestamp::now();
        Ok(())
    }

    fn delete_item(&mut self, item_id: u64) -> Result<()> {
        self.record_write("delete_item")?;
        self.working
            .items
            .remove(&item_id)
            .ok_or(PlannerError::ItemNotFound { id: item_id })?;
        // ON DELETE SET NULL
        for saved in self.working.saved_places.values_mut() {
            if saved.current_item_id == Some(item_id) {
                saved.current_item_id = None;
            }
        }
        Ok(())
    }

    fn set_saved_place_item(
        &mut self,
        user_id: u64,
        place_id: u64,
        item_id: Option<u64>,
    ) -> Result<bool> {
        let Some(saved_id) = self.working.saved_place(user_id, place_id).map(|s| s.id) else {
            return Ok(false);
        };
        self.record_write("set_saved_place_item")?;
        if let Some(saved) = self.working.saved_places.get_mut(&saved_id) {
            saved.is_placed = item_id.is_some();
            saved.current_item_id = item_id;
        }
        Ok(true)
    }

    fn set_day_number(&mut self, day_id: u64, day_number: i64, date: Option<Date>) -> Result<()> {
        self.record_write("set_day_number")?;
        let trip_id = self
            .working
            .days
            .get(&day_id)
            .map(|day| day.trip_id)
            .ok_or(PlannerError::DayNotFound { id: day_id })?;
        self.working
            .check_day_number_free(day_id, trip_id, day_number)?;
        if let Some(day) = self.working.days.get_mut(&day_id) {
            day.day_number = day_number;
            day.date = date;
        }
        Ok(())
    }

    fn delete_day(&mut self, day_id: u64) -> Result<()> {
        self.record_write("delete_day")?;
        if self.working.items.values().any(|item| item.day_id == day_id) {
            return Err(PlannerError::Conflict {
                message: format!("day {day_id} still holds items"),
            });
        }
        self.working
            .days
            .remove(&day_id)
            .ok_or(PlannerError::DayNotFound { id: day_id })?;
        Ok(())
    }

    fn delete_trip(&mut self, trip_id: u64) -> Result<()> {
        self.record_write("delete_trip")?;
        if self.working.days.values().any(|day| day.trip_id == trip_id) {
            return Err(PlannerError::Conflict {
                message: format!("trip {trip_id} still holds days"),
            });
        }
        self.working
            .trips
            .remove(&trip_id)
            .ok_or(PlannerError::TripNotFound { id: trip_id })?;
        Ok(())
    }

    fn touch_trip(&mut self, trip_id: u64) -> Result<()> {
        let trip = self
            .working
            .trips
            .get_mut(&trip_id)
            .ok_or(PlannerError::TripNotFound { id: trip_id })?;
        trip.updated_at = Timestamp::now();
        Ok(())
    }

    fn commit(self) -> Result<()> {
        self.store.tables = self.working;
        Ok(())
    }

    fn rollback(self) -> Result<()> {
        Ok(())
    }
}
