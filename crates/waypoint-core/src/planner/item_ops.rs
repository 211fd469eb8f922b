//! Itinerary item operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::{PlannerError, Result},
    models::{Item, UpdateItemRequest},
    params::{ItemRef, MoveItem, PlaceItem, UpdateItem},
};

impl TripPlanner {
    /// Schedules a place on a day at a 0-based position (append when absent).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use waypoint_core::{params::PlaceItem, TripPlannerBuilder};
    /// # async {
    /// let planner = TripPlannerBuilder::new().build().await?;
    /// let item = planner
    ///     .place_item(&PlaceItem {
    ///         user_id: 1,
    ///         day_id: 3,
    ///         place_id: 7,
    ///         position: Some(0),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// println!("{item}");
    /// # Result::<(), waypoint_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn place_item(&self, params: &PlaceItem) -> Result<Item> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.place_item(&params))
            .await
    }

    pub async fn get_item(&self, params: &ItemRef) -> Result<Item> {
        let (user_id, item_id) = (params.user_id, params.item_id);
        self.with_database(move |db| db.get_item(user_id, item_id))
            .await
    }

    /// Moves an item within its day or to another day.
    pub async fn move_item(&self, params: &MoveItem) -> Result<Item> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.move_item(&params))
            .await
    }

    /// Edits an item's scheduled time, duration, notes or transport link.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - When nothing would change or a field does not parse
    /// * `ItemNotFound` / `Forbidden` - When the item is absent or not owned
    pub async fn update_item(&self, params: &UpdateItem) -> Result<Item> {
        if params.is_empty() {
            return Err(PlannerError::invalid_input("item").with_reason("no fields to update"));
        }
        let request = UpdateItemRequest::try_from(params)?;
        let (user_id, item_id) = (params.user_id, params.item_id);

        self.with_database(move |db| db.update_item(user_id, item_id, &request))
            .await
    }

    /// Deletes an item and updates the owner's saved place.
    pub async fn delete_item(&self, params: &ItemRef) -> Result<()> {
        let params = params.clone();
        self.with_coordinator(move |coordinator| coordinator.delete_item(&params))
            .await
    }
}
