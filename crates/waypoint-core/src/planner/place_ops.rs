//! Place pool and saved place operations for the TripPlanner.

use super::TripPlanner;
use crate::{
    error::Result,
    models::{Place, SavedPlace},
    params::{CreatePlace, Id, ListPlaces, PlaceRef, SavePlace},
};

impl TripPlanner {
    /// Adds a place to the shared pool.
    pub async fn create_place(&self, params: &CreatePlace) -> Result<Place> {
        let params = params.clone();
        self.with_database(move |db| {
            db.create_place(
                &params.name,
                params.address.as_deref(),
                params.place_type.as_deref(),
                params.latitude,
                params.longitude,
            )
        })
        .await
    }

    pub async fn get_place(&self, params: &Id) -> Result<Place> {
        let place_id = params.id;
        self.with_database(move |db| db.get_place(place_id)).await
    }

    /// Browses the pool by name, optionally filtered by name substring and
    /// type.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - When the limit is outside `1..=500`
    pub async fn list_places(&self, params: &ListPlaces) -> Result<Vec<Place>> {
        let limit = params.limit()?;
        let params = params.clone();
        self.with_database(move |db| {
            db.list_places(params.search.as_deref(), params.place_type.as_deref(), limit)
        })
        .await
    }

    /// Bookmarks a place for a user.
    pub async fn save_place(&self, params: &SavePlace) -> Result<SavedPlace> {
        let params = params.clone();
        self.with_database(move |db| {
            db.save_place(params.user_id, params.place_id, params.notes.as_deref())
        })
        .await
    }

    pub async fn get_saved_place(&self, params: &PlaceRef) -> Result<SavedPlace> {
        let (user_id, place_id) = (params.user_id, params.place_id);
        self.with_database(move |db| db.get_saved_place(user_id, place_id))
            .await
    }

    /// Lists the saved places of the user identified by `params.id`.
    pub async fn list_saved_places(&self, params: &Id) -> Result<Vec<SavedPlace>> {
        let user_id = params.id;
        self.with_database(move |db| db.list_saved_places(user_id))
            .await
    }

    /// Removes a bookmark.
    pub async fn unsave_place(&self, params: &PlaceRef) -> Result<()> {
        let (user_id, place_id) = (params.user_id, params.place_id);
        self.with_database(move |db| db.unsave_place(user_id, place_id))
            .await
    }
}
