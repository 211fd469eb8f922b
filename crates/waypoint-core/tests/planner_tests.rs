mod common;

use common::{create_itinerary, create_place, create_test_planner};
use waypoint_core::{
    display::{TripSummaries, UpdateResult},
    params::{
        DayRef, Id, ItemRef, ListTrips, MoveItem, PlaceItem, PlaceRef, SavePlace, TripRef,
        UpdateItem,
    },
    PlannerError, TransportMode,
};

#[tokio::test]
#[allow(clippy::too_many_lines)]
async fn test_complete_itinerary_workflow() {
    let (_temp_dir, planner) = create_test_planner().await;
    let itinerary = create_itinerary(&planner, "ana", Some("2025-10-03"), 3).await;
    let user_id = itinerary.user_id;

    let names = ["Belem Tower", "Jeronimos", "LX Factory", "Alfama"];
    let mut place_ids = Vec::new();
    for name in names {
        place_ids.push(create_place(&planner, name).await);
    }
    for place_id in &place_ids {
        planner
            .save_place(&SavePlace {
                user_id,
                place_id: *place_id,
                notes: None,
            })
            .await
            .expect("Failed to save place");
    }

    // Fill day 1 with three places, the third one in front
    let mut items = Vec::new();
    for (place_id, position) in place_ids[..3].iter().zip([None, None, Some(0)]) {
        let item = planner
            .place_item(&PlaceItem {
                user_id,
                day_id: itinerary.day_ids[0],
                place_id: *place_id,
                position,
                ..Default::default()
            })
            .await
            .expect("Failed to place item");
        items.push(item);
    }
    let day = planner
        .get_day(&DayRef {
            user_id,
            day_id: itinerary.day_ids[0],
        })
        .await
        .unwrap();
    let order: Vec<u64> = day.items.iter().map(|i| i.id).collect();
    assert_eq!(order, vec![items[2].id, items[0].id, items[1].id]);

    // Give the first item a transport link, then move it to day 2
    planner
        .update_item(&UpdateItem {
            user_id,
            item_id: items[2].id,
            transport_to_next: Some("walk".to_string()),
            transport_duration_minutes: Some(12),
            ..Default::default()
        })
        .await
        .unwrap();
    let moved = planner
        .move_item(&MoveItem {
            user_id,
            item_id: items[2].id,
            target_day_id: itinerary.day_ids[1],
            target_position: 5,
        })
        .await
        .unwrap();
    assert_eq!(moved.day_id, itinerary.day_ids[1]);
    assert_eq!(moved.rank.to_string(), "1.0");
    assert!(!moved.has_transport_link());

    // Day 1 is deleted; day 2 becomes day 1 and takes over its date
    planner
        .delete_day(&DayRef {
            user_id,
            day_id: itinerary.day_ids[0],
        })
        .await
        .unwrap();
    let trip = planner
        .get_trip(&TripRef {
            user_id,
            trip_id: itinerary.trip_id,
        })
        .await
        .unwrap();
    assert_eq!(trip.days.len(), 2);
    assert_eq!(trip.days[0].id, itinerary.day_ids[1]);
    assert_eq!(trip.days[0].day_number, 1);
    assert_eq!(trip.days[0].date.unwrap().to_string(), "2025-10-03");
    assert_eq!(trip.days[0].items.len(), 1);
    assert_eq!(trip.days[1].day_number, 2);

    // Only the moved place is still scheduled
    let saved = planner
        .list_saved_places(&Id { id: user_id })
        .await
        .unwrap();
    let placed: Vec<u64> = saved
        .iter()
        .filter(|s| s.is_placed)
        .map(|s| s.place_id)
        .collect();
    assert_eq!(placed, vec![place_ids[2]]);

    let summaries = TripSummaries(
        planner
            .list_trips(&ListTrips {
                user_id,
                archived: false,
            })
            .await
            .unwrap(),
    );
    assert!(summaries.to_string().contains("(2 days, 1 items)"));
}

#[tokio::test]
async fn test_saved_place_follows_most_recent_item() {
    let (_temp_dir, planner) = create_test_planner().await;
    let itinerary = create_itinerary(&planner, "ana", None, 2).await;
    let user_id = itinerary.user_id;
    let place_id = create_place(&planner, "Sintra").await;
    planner
        .save_place(&SavePlace {
            user_id,
            place_id,
            notes: None,
        })
        .await
        .unwrap();

    let mut item_ids = Vec::new();
    for day_id in &itinerary.day_ids {
        let item = planner
            .place_item(&PlaceItem {
                user_id,
                day_id: *day_id,
                place_id,
                ..Default::default()
            })
            .await
            .unwrap();
        item_ids.push(item.id);
    }
    let saved = planner
        .get_saved_place(&PlaceRef { user_id, place_id })
        .await
        .unwrap();
    assert_eq!(saved.current_item_id, Some(item_ids[1]));

    // Deleting the newer item falls back to the older one
    planner
        .delete_item(&ItemRef {
            user_id,
            item_id: item_ids[1],
        })
        .await
        .unwrap();
    let saved = planner
        .get_saved_place(&PlaceRef { user_id, place_id })
        .await
        .unwrap();
    assert!(saved.is_placed);
    assert_eq!(saved.current_item_id, Some(item_ids[0]));
}

#[tokio::test]
async fn test_days_without_start_date_keep_null_dates() {
    let (_temp_dir, planner) = create_test_planner().await;
    let itinerary = create_itinerary(&planner, "ana", None, 3).await;

    planner
        .delete_day(&DayRef {
            user_id: itinerary.user_id,
            day_id: itinerary.day_ids[0],
        })
        .await
        .unwrap();
    let trip = planner
        .get_trip(&TripRef {
            user_id: itinerary.user_id,
            trip_id: itinerary.trip_id,
        })
        .await
        .unwrap();
    assert!(trip.days.iter().all(|d| d.date.is_none()));
    let numbers: Vec<i64> = trip.days.iter().map(|d| d.day_number).collect();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn test_users_are_isolated() {
    let (_temp_dir, planner) = create_test_planner().await;
    let ana = create_itinerary(&planner, "ana", None, 1).await;
    let bob = create_itinerary(&planner, "bob", None, 1).await;
    let place_id = create_place(&planner, "Cascais").await;

    let item = planner
        .place_item(&PlaceItem {
            user_id: ana.user_id,
            day_id: ana.day_ids[0],
            place_id,
            ..Default::default()
        })
        .await
        .unwrap();

    // Bob may not pull Ana's item into his own day
    let err = planner
        .move_item(&MoveItem {
            user_id: bob.user_id,
            item_id: item.id,
            target_day_id: bob.day_ids[0],
            target_position: 0,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Forbidden { .. }));

    // Nor may Ana place into Bob's day
    let err = planner
        .place_item(&PlaceItem {
            user_id: ana.user_id,
            day_id: bob.day_ids[0],
            place_id,
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Forbidden { .. }));

    let trips = planner
        .list_trips(&ListTrips {
            user_id: bob.user_id,
            archived: false,
        })
        .await
        .unwrap();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0].total_items, 0);
}

#[tokio::test]
async fn test_update_item_reports_changes() {
    let (_temp_dir, planner) = create_test_planner().await;
    let itinerary = create_itinerary(&planner, "ana", None, 1).await;
    let place_id = create_place(&planner, "Time Out Market").await;
    let item = planner
        .place_item(&PlaceItem {
            user_id: itinerary.user_id,
            day_id: itinerary.day_ids[0],
            place_id,
            scheduled_time: Some("12:30".to_string()),
            duration_minutes: Some(60),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = planner
        .update_item(&UpdateItem {
            user_id: itinerary.user_id,
            item_id: item.id,
            notes: Some("try the bifana".to_string()),
            transport_to_next: Some("subway".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.transport_to_next, Some(TransportMode::Subway));
    assert_eq!(updated.duration_minutes, Some(60));

    let output = UpdateResult::with_changes(updated, vec!["Added notes".to_string()]).to_string();
    assert!(output.contains("### "));
    assert!(output.contains("12:30"));
    assert!(output.contains("try the bifana"));

    let err = planner
        .update_item(&UpdateItem {
            user_id: itinerary.user_id,
            item_id: item.id,
            transport_to_next: Some("rocket".to_string()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));
}
