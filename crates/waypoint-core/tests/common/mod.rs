use tempfile::TempDir;
use waypoint_core::{
    params::{AppendDay, CreatePlace, CreateTrip, CreateUser},
    TripPlanner, TripPlannerBuilder,
};

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, TripPlanner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = TripPlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// A user, one of their trips and its days.
pub struct Itinerary {
    pub user_id: u64,
    pub trip_id: u64,
    pub day_ids: Vec<u64>,
}

/// Creates a user owning a trip with `days` days, starting on `start_date`.
pub async fn create_itinerary(
    planner: &TripPlanner,
    username: &str,
    start_date: Option<&str>,
    days: usize,
) -> Itinerary {
    let user = planner
        .create_user(&CreateUser {
            username: username.to_string(),
        })
        .await
        .expect("Failed to create user");
    let trip = planner
        .create_trip(&CreateTrip {
            user_id: user.id,
            name: format!("{username}'s trip"),
            start_date: start_date.map(String::from),
            ..Default::default()
        })
        .await
        .expect("Failed to create trip");

    let mut day_ids = Vec::with_capacity(days);
    for _ in 0..days {
        let day = planner
            .append_day(&AppendDay {
                user_id: user.id,
                trip_id: trip.id,
                notes: None,
            })
            .await
            .expect("Failed to append day");
        day_ids.push(day.id);
    }

    Itinerary {
        user_id: user.id,
        trip_id: trip.id,
        day_ids,
    }
}

/// Adds a place to the shared pool and returns its ID.
pub async fn create_place(planner: &TripPlanner, name: &str) -> u64 {
    planner
        .create_place(&CreatePlace {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create place")
        .id
}
