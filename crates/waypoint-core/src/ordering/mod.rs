//! Ordering coordinator for itinerary items and days.
//!
//! Every operation runs inside exactly one [`UnitOfWork`]: the coordinator
//! reads the affected day's ranked sequence, asks the [`RankAllocator`] for
//! a rank, writes the changed rows and keeps the owner's saved places in
//! step. On success the unit commits; on any error it is rolled back and
//! the original error is returned.
//!
//! A place or move writes exactly one item row. The only exception is
//! inline repair: when the gap at the insertion point has been bisected down
//! to the precision floor, the target day is rebalanced inside the same unit
//! of work before the rank is recomputed.
//!
//! # Examples
//!
//! ```rust
//! use waypoint_core::{params::PlaceItem, MemoryStore, OrderingCoordinator, RankAllocator};
//!
//! let mut store = MemoryStore::new();
//! let user = store.create_user("ana");
//! let trip = store.create_trip(user.id, "Porto", None);
//! let day = store.append_day(trip.id)?;
//! let place = store.create_place("Livraria Lello");
//!
//! let mut coordinator = OrderingCoordinator::new(store, RankAllocator::default());
//! let item = coordinator.place_item(&PlaceItem {
//!     user_id: user.id,
//!     day_id: day.id,
//!     place_id: place.id,
//!     ..Default::default()
//! })?;
//! assert_eq!(item.rank.to_string(), "1.0");
//! # Ok::<(), waypoint_core::PlannerError>(())
//! ```

use log::{info, warn};

use crate::{
    error::{PlannerError, Result},
    models::Item,
    params::{self, DayRef, ItemRef, MoveItem, PlaceItem, TripRef},
    rank::{is_strictly_between, Rank, RankAllocator},
    store::{access, Repository, UnitOfWork},
};

mod placement;
mod rebalance;
mod removal;

#[cfg(test)]
mod tests;

/// Applies ordering operations to a repository.
#[derive(Debug)]
pub struct OrderingCoordinator<R> {
    repository: R,
    allocator: RankAllocator,
}

impl<R: Repository> OrderingCoordinator<R> {
    pub fn new(repository: R, allocator: RankAllocator) -> Self {
        Self {
            repository,
            allocator,
        }
    }

    pub fn allocator(&self) -> &RankAllocator {
        &self.allocator
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    /// Places a place into a day at a 0-based position, appending when the
    /// position is absent.
    ///
    /// # Errors
    ///
    /// * `DayNotFound` / `PlaceNotFound` - When a referenced row is absent
    /// * `Forbidden` - When the day belongs to another user's trip
    /// * `InvalidInput` - When the scheduled time does not parse
    pub fn place_item(&mut self, params: &PlaceItem) -> Result<Item> {
        let scheduled_time =
            params::parse_time("scheduled_time", params.scheduled_time.as_deref())?;
        let mut unit = self.repository.begin()?;
        let outcome = placement::place_item(&mut unit, &self.allocator, params, scheduled_time);
        finish(unit, outcome, "place_item")
    }

    /// Moves an item within its day or to another day.
    ///
    /// `target_position` indexes the target day as displayed, so for a
    /// same-day move it counts the moving item itself.
    ///
    /// # Errors
    ///
    /// * `ItemNotFound` / `DayNotFound` - When a referenced row is absent
    /// * `Forbidden` - When either day belongs to another user's trip
    pub fn move_item(&mut self, params: &MoveItem) -> Result<Item> {
        let mut unit = self.repository.begin()?;
        let outcome = placement::move_item(&mut unit, &self.allocator, params);
        finish(unit, outcome, "move_item")
    }

    /// Deletes an item and repairs the owner's saved place.
    ///
    /// Sibling ranks are left untouched.
    pub fn delete_item(&mut self, params: &ItemRef) -> Result<()> {
        let mut unit = self.repository.begin()?;
        let outcome = removal::delete_item(&mut unit, params);
        finish(unit, outcome, "delete_item")
    }

    /// Deletes a day with all its items and closes the numbering gap.
    ///
    /// Later days move down by one and their dates shift back one day.
    pub fn delete_day(&mut self, params: &DayRef) -> Result<()> {
        let mut unit = self.repository.begin()?;
        let outcome = removal::delete_day(&mut unit, params);
        finish(unit, outcome, "delete_day")
    }

    /// Deletes a trip with all its days and items.
    ///
    /// Items go one by one so the owner's saved places are re-pointed or
    /// unplaced exactly as for [`Self::delete_item`].
    pub fn delete_trip(&mut self, params: &TripRef) -> Result<()> {
        let mut unit = self.repository.begin()?;
        let outcome = removal::delete_trip(&mut unit, params);
        finish(unit, outcome, "delete_trip")
    }

    /// Rewrites every item of a day to evenly spaced whole ranks, keeping
    /// the current order. Returns the items in their new order.
    pub fn rebalance_day(&mut self, params: &DayRef) -> Result<Vec<Item>> {
        let mut unit = self.repository.begin()?;
        let outcome = rebalance::rebalance_day(&mut unit, &self.allocator, params);
        finish(unit, outcome, "rebalance_day")
    }

    /// Whether any adjacent gap in the day has shrunk below the rebalance
    /// threshold.
    pub fn day_needs_rebalance(&mut self, params: &DayRef) -> Result<bool> {
        let unit = self.repository.begin()?;
        let outcome = access::owned_day(&unit, params.day_id, params.user_id)
            .and_then(|(day, _)| unit.day_items(day.id))
            .map(|items| {
                let ranks: Vec<Rank> = items.iter().map(|item| item.rank).collect();
                self.allocator.needs_rebalance(&ranks)
            });
        finish(unit, outcome, "day_needs_rebalance")
    }
}

/// Commits on success, otherwise rolls back and returns the original error.
fn finish<U: UnitOfWork, T>(unit: U, outcome: Result<T>, operation: &str) -> Result<T> {
    match outcome {
        Ok(value) => {
            unit.commit()?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = unit.rollback() {
                warn!("Rollback after failed {operation} also failed: {rollback_err}");
            }
            Err(err)
        }
    }
}

/// Rank for inserting at `position` among `siblings` (display order, the
/// moving item excluded).
///
/// Rebalances the siblings first when the gap at the insertion point is
/// exhausted.
fn allocate<U: UnitOfWork>(
    unit: &mut U,
    allocator: &RankAllocator,
    siblings: &[Item],
    position: i64,
) -> Result<Rank> {
    let ranks: Vec<Rank> = siblings.iter().map(|item| item.rank).collect();
    let (prev, next) = allocator.bounds_for_position(&ranks, position);
    let rank = allocator.rank_between(prev, next);
    if is_strictly_between(prev, rank, next) {
        return Ok(rank);
    }

    info!(
        "No rank left between {:?} and {:?}; rebalancing {} items",
        prev.map(|r| r.to_string()),
        next.map(|r| r.to_string()),
        siblings.len()
    );
    let repaired: Vec<Rank> = rebalance::rewrite_ranks(unit, allocator, siblings)?
        .iter()
        .map(|item| item.rank)
        .collect();
    let (prev, next) = allocator.bounds_for_position(&repaired, position);
    let rank = allocator.rank_between(prev, next);
    if !is_strictly_between(prev, rank, next) {
        return Err(PlannerError::Conflict {
            message: format!("no rank available at position {position} after rebalancing"),
        });
    }
    Ok(rank)
}
