//! Coordinator tests against the in-memory store.

use jiff::civil::{date, Date};

use super::*;
use crate::{
    models::{Day, TransportMode, UpdateItemRequest},
    MemoryStore,
};

struct Fixture {
    coordinator: OrderingCoordinator<MemoryStore>,
    user_id: u64,
    trip_id: u64,
    days: Vec<Day>,
    places: Vec<u64>,
}

fn fixture(day_count: usize, start_date: Option<Date>) -> Fixture {
    let mut store = MemoryStore::new();
    let user = store.create_user("ana");
    let trip = store.create_trip(user.id, "Portugal", start_date);
    let days = (0..day_count)
        .map(|_| store.append_day(trip.id).expect("append day"))
        .collect();
    let places = ["Sintra", "Belem", "Alfama", "Cascais", "Obidos"]
        .iter()
        .map(|name| store.create_place(name).id)
        .collect();

    Fixture {
        coordinator: OrderingCoordinator::new(store, RankAllocator::default()),
        user_id: user.id,
        trip_id: trip.id,
        days,
        places,
    }
}

impl Fixture {
    fn place(&mut self, day: usize, place: usize, position: Option<i64>) -> Item {
        self.coordinator
            .place_item(&PlaceItem {
                user_id: self.user_id,
                day_id: self.days[day].id,
                place_id: self.places[place],
                position,
                ..Default::default()
            })
            .expect("place item")
    }

    fn move_to(&mut self, item_id: u64, day: usize, position: i64) -> Result<Item> {
        self.coordinator.move_item(&MoveItem {
            user_id: self.user_id,
            item_id,
            target_day_id: self.days[day].id,
            target_position: position,
        })
    }

    fn day_ref(&self, day: usize) -> DayRef {
        DayRef {
            user_id: self.user_id,
            day_id: self.days[day].id,
        }
    }

    fn order(&self, day: usize) -> Vec<u64> {
        self.store()
            .day_items(self.days[day].id)
            .iter()
            .map(|item| item.id)
            .collect()
    }

    fn ranks(&self, day: usize) -> Vec<String> {
        self.store()
            .day_items(self.days[day].id)
            .iter()
            .map(|item| item.rank.to_string())
            .collect()
    }

    fn store(&self) -> &MemoryStore {
        self.coordinator.repository()
    }

    fn store_mut(&mut self) -> &mut MemoryStore {
        self.coordinator.repository_mut()
    }
}

fn r(s: &str) -> Rank {
    s.parse().expect("valid rank literal")
}

#[test]
fn test_place_item_ranks() {
    let mut fx = fixture(1, None);

    let first = fx.place(0, 0, None);
    assert_eq!(first.rank, r("1.0"));
    let appended = fx.place(0, 1, None);
    assert_eq!(appended.rank, r("2.0"));
    let prepended = fx.place(0, 2, Some(0));
    assert_eq!(prepended.rank, r("0.5"));
    let middle = fx.place(0, 3, Some(2));
    assert_eq!(middle.rank, r("1.5"));

    assert_eq!(
        fx.order(0),
        vec![prepended.id, first.id, middle.id, appended.id]
    );
}

#[test]
fn test_place_item_clamps_out_of_range_positions() {
    let mut fx = fixture(1, None);
    fx.place(0, 0, None);

    assert_eq!(fx.place(0, 1, Some(50)).rank, r("2.0"));
    assert_eq!(fx.place(0, 2, Some(-4)).rank, r("0.5"));
}

#[test]
fn test_place_item_keeps_scheduling_fields() {
    let mut fx = fixture(1, None);
    let item = fx
        .coordinator
        .place_item(&PlaceItem {
            user_id: fx.user_id,
            day_id: fx.days[0].id,
            place_id: fx.places[0],
            position: None,
            scheduled_time: Some("10:15".to_string()),
            duration_minutes: Some(45),
            notes: Some("buy tickets online".to_string()),
        })
        .unwrap();

    assert_eq!(item.scheduled_time, Some(jiff::civil::time(10, 15, 0, 0)));
    assert_eq!(item.duration_minutes, Some(45));
    assert_eq!(item.notes.as_deref(), Some("buy tickets online"));
}

#[test]
fn test_place_item_rejects_bad_time_before_writing() {
    let mut fx = fixture(1, None);
    let err = fx
        .coordinator
        .place_item(&PlaceItem {
            user_id: fx.user_id,
            day_id: fx.days[0].id,
            place_id: fx.places[0],
            scheduled_time: Some("noonish".to_string()),
            ..Default::default()
        })
        .unwrap_err();

    assert!(matches!(err, PlannerError::InvalidInput { .. }));
    assert_eq!(fx.store().item_count(), 0);
}

#[test]
fn test_place_item_marks_saved_place() {
    let mut fx = fixture(1, None);
    let (user_id, place_id) = (fx.user_id, fx.places[0]);
    fx.store_mut().save_place(user_id, place_id).unwrap();

    let item = fx.place(0, 0, None);

    let saved = fx.store().saved_place(user_id, place_id).unwrap();
    assert!(saved.is_placed);
    assert_eq!(saved.current_item_id, Some(item.id));
}

#[test]
fn test_place_item_without_saved_place_is_fine() {
    let mut fx = fixture(1, None);
    fx.place(0, 0, None);
    assert!(fx.store().saved_place(fx.user_id, fx.places[0]).is_none());
}

#[test]
fn test_place_item_failure_modes() {
    let mut fx = fixture(1, None);
    let intruder = fx.store_mut().create_user("mallory").id;

    let missing_day = fx.coordinator.place_item(&PlaceItem {
        user_id: fx.user_id,
        day_id: 9_999,
        place_id: fx.places[0],
        ..Default::default()
    });
    assert!(matches!(
        missing_day,
        Err(PlannerError::DayNotFound { id: 9_999 })
    ));

    let missing_place = fx.coordinator.place_item(&PlaceItem {
        user_id: fx.user_id,
        day_id: fx.days[0].id,
        place_id: 9_999,
        ..Default::default()
    });
    assert!(matches!(
        missing_place,
        Err(PlannerError::PlaceNotFound { id: 9_999 })
    ));

    let foreign = fx.coordinator.place_item(&PlaceItem {
        user_id: intruder,
        day_id: fx.days[0].id,
        place_id: fx.places[0],
        ..Default::default()
    });
    assert!(matches!(foreign, Err(PlannerError::Forbidden { .. })));

    assert_eq!(fx.store().item_count(), 0);
}

#[test]
fn test_same_day_move_translates_target_index() {
    let mut fx = fixture(1, None);
    let items: Vec<Item> = (0..4).map(|p| fx.place(0, p, None)).collect();
    assert_eq!(fx.ranks(0), vec!["1.0", "2.0", "3.0", "4.0"]);

    let moved = fx.move_to(items[0].id, 0, 2).unwrap();

    assert_eq!(moved.rank, r("2.5"));
    assert_eq!(
        fx.order(0),
        vec![items[1].id, items[0].id, items[2].id, items[3].id]
    );
}

#[test]
fn test_same_day_move_upwards() {
    let mut fx = fixture(1, None);
    let items: Vec<Item> = (0..4).map(|p| fx.place(0, p, None)).collect();

    let moved = fx.move_to(items[3].id, 0, 1).unwrap();

    assert_eq!(moved.rank, r("1.5"));
    assert_eq!(
        fx.order(0),
        vec![items[0].id, items[3].id, items[1].id, items[2].id]
    );
}

#[test]
fn test_move_to_current_position_keeps_order() {
    let mut fx = fixture(1, None);
    let items: Vec<Item> = (0..4).map(|p| fx.place(0, p, None)).collect();
    let before = fx.order(0);

    for (index, item) in items.iter().enumerate() {
        let moved = fx.move_to(item.id, 0, index as i64).unwrap();
        assert_eq!(moved.rank, item.rank);
        assert_eq!(fx.order(0), before);
    }
}

#[test]
fn test_move_past_end_appends() {
    let mut fx = fixture(1, None);
    let items: Vec<Item> = (0..3).map(|p| fx.place(0, p, None)).collect();

    let moved = fx.move_to(items[0].id, 0, 10).unwrap();

    assert_eq!(moved.rank, r("4.0"));
    assert_eq!(fx.order(0), vec![items[1].id, items[2].id, items[0].id]);
}

#[test]
fn test_cross_day_move_clears_transport() {
    let mut fx = fixture(2, None);
    let item = fx.place(0, 0, None);
    let target = fx.place(1, 1, None);
    let link = UpdateItemRequest {
        transport_to_next: Some(TransportMode::Subway),
        transport_duration_minutes: Some(12),
        duration_minutes: Some(60),
        ..Default::default()
    };
    fx.store_mut().update_item(item.id, &link).unwrap();

    let moved = fx.move_to(item.id, 1, 0).unwrap();

    assert_eq!(moved.day_id, fx.days[1].id);
    assert_eq!(moved.transport_to_next, None);
    assert_eq!(moved.transport_duration_minutes, None);
    assert_eq!(moved.duration_minutes, Some(60));
    assert_eq!(fx.order(1), vec![item.id, target.id]);
    assert!(fx.order(0).is_empty());
}

#[test]
fn test_same_day_move_keeps_transport() {
    let mut fx = fixture(1, None);
    let first = fx.place(0, 0, None);
    fx.place(0, 1, None);
    let link = UpdateItemRequest {
        transport_to_next: Some(TransportMode::Walk),
        transport_duration_minutes: Some(5),
        ..Default::default()
    };
    fx.store_mut().update_item(first.id, &link).unwrap();

    let moved = fx.move_to(first.id, 0, 2).unwrap();

    assert_eq!(moved.transport_to_next, Some(TransportMode::Walk));
    assert_eq!(moved.transport_duration_minutes, Some(5));
}

#[test]
fn test_move_failure_modes() {
    let mut fx = fixture(1, None);
    let item = fx.place(0, 0, None);

    assert!(matches!(
        fx.move_to(9_999, 0, 0),
        Err(PlannerError::ItemNotFound { id: 9_999 })
    ));
    assert!(matches!(
        fx.coordinator.move_item(&MoveItem {
            user_id: fx.user_id,
            item_id: item.id,
            target_day_id: 9_999,
            target_position: 0,
        }),
        Err(PlannerError::DayNotFound { id: 9_999 })
    ));

    // a day in somebody else's trip
    let other_user = fx.store_mut().create_user("bo").id;
    let other_trip = fx.store_mut().create_trip(other_user, "Madrid", None).id;
    let other_day = fx.store_mut().append_day(other_trip).unwrap().id;
    assert!(matches!(
        fx.coordinator.move_item(&MoveItem {
            user_id: fx.user_id,
            item_id: item.id,
            target_day_id: other_day,
            target_position: 0,
        }),
        Err(PlannerError::Forbidden { .. })
    ));
    assert!(matches!(
        fx.coordinator.move_item(&MoveItem {
            user_id: other_user,
            item_id: item.id,
            target_day_id: other_day,
            target_position: 0,
        }),
        Err(PlannerError::Forbidden { .. })
    ));
    assert_eq!(fx.store().item(item.id).unwrap().day_id, fx.days[0].id);
}

#[test]
fn test_delete_item_clears_saved_place() {
    let mut fx = fixture(1, None);
    let (user_id, place_id) = (fx.user_id, fx.places[0]);
    fx.store_mut().save_place(user_id, place_id).unwrap();
    let item = fx.place(0, 0, None);
    let sibling = fx.place(0, 1, None);

    fx.coordinator
        .delete_item(&ItemRef {
            user_id,
            item_id: item.id,
        })
        .unwrap();

    let saved = fx.store().saved_place(user_id, place_id).unwrap();
    assert!(!saved.is_placed);
    assert_eq!(saved.current_item_id, None);
    // siblings keep their rank
    assert_eq!(fx.store().item(sibling.id).unwrap().rank, sibling.rank);
}

#[test]
fn test_delete_item_repoints_to_remaining_item() {
    let mut fx = fixture(2, None);
    let (user_id, place_id) = (fx.user_id, fx.places[0]);
    fx.store_mut().save_place(user_id, place_id).unwrap();
    let earlier = fx.place(0, 0, None);
    let later = fx.place(1, 0, None);

    fx.coordinator
        .delete_item(&ItemRef {
            user_id,
            item_id: later.id,
        })
        .unwrap();

    let saved = fx.store().saved_place(user_id, place_id).unwrap();
    assert!(saved.is_placed);
    assert_eq!(saved.current_item_id, Some(earlier.id));
}

#[test]
fn test_delete_item_failure_modes() {
    let mut fx = fixture(1, None);
    let item = fx.place(0, 0, None);
    let intruder = fx.store_mut().create_user("mallory").id;

    assert!(matches!(
        fx.coordinator.delete_item(&ItemRef {
            user_id: fx.user_id,
            item_id: 9_999,
        }),
        Err(PlannerError::ItemNotFound { id: 9_999 })
    ));
    assert!(matches!(
        fx.coordinator.delete_item(&ItemRef {
            user_id: intruder,
            item_id: item.id,
        }),
        Err(PlannerError::Forbidden { .. })
    ));
    assert_eq!(fx.store().item_count(), 1);
}

#[test]
fn test_delete_day_renumbers_and_shifts_dates() {
    let mut fx = fixture(4, Some(date(2025, 3, 30)));
    let doomed = fx.place(1, 0, None);
    let kept = fx.place(2, 1, None);
    let (user_id, place_id) = (fx.user_id, fx.places[0]);
    fx.store_mut().save_place(user_id, place_id).unwrap();

    let day_ref = fx.day_ref(1);
    fx.coordinator.delete_day(&day_ref).unwrap();

    let days = fx.store().trip_days(fx.trip_id);
    let numbers: Vec<i64> = days.iter().map(|d| d.day_number).collect();
    let dates: Vec<Option<Date>> = days.iter().map(|d| d.date).collect();
    let ids: Vec<u64> = days.iter().map(|d| d.id).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(
        dates,
        vec![
            Some(date(2025, 3, 30)),
            Some(date(2025, 3, 31)),
            Some(date(2025, 4, 1))
        ]
    );
    assert_eq!(ids, vec![fx.days[0].id, fx.days[2].id, fx.days[3].id]);

    assert!(fx.store().item(doomed.id).is_none());
    assert_eq!(fx.store().item(kept.id).unwrap().day_id, fx.days[2].id);
    let saved = fx.store().saved_place(user_id, place_id).unwrap();
    assert!(!saved.is_placed);
}

#[test]
fn test_delete_day_without_start_date_shifts_existing_dates() {
    let mut fx = fixture(3, None);
    let (second, third) = (fx.days[1].id, fx.days[2].id);
    fx.store_mut()
        .set_day_date(second, Some(date(2025, 1, 11)))
        .unwrap();
    fx.store_mut().set_day_date(third, None).unwrap();
    let first = fx.days[0].id;
    fx.store_mut()
        .set_day_date(first, Some(date(2025, 1, 10)))
        .unwrap();

    let day_ref = fx.day_ref(0);
    fx.coordinator.delete_day(&day_ref).unwrap();

    let days = fx.store().trip_days(fx.trip_id);
    assert_eq!(days[0].id, second);
    assert_eq!(days[0].day_number, 1);
    assert_eq!(days[0].date, Some(date(2025, 1, 10)));
    assert_eq!(days[1].id, third);
    assert_eq!(days[1].day_number, 2);
    assert_eq!(days[1].date, None);
}

#[test]
fn test_delete_last_day_touches_nothing_else() {
    let mut fx = fixture(2, Some(date(2025, 5, 1)));
    let day_ref = fx.day_ref(1);
    fx.coordinator.delete_day(&day_ref).unwrap();

    let days = fx.store().trip_days(fx.trip_id);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].day_number, 1);
    assert_eq!(days[0].date, Some(date(2025, 5, 1)));
}

#[test]
fn test_delete_day_failure_modes() {
    let mut fx = fixture(1, None);
    let intruder = fx.store_mut().create_user("mallory").id;

    assert!(matches!(
        fx.coordinator.delete_day(&DayRef {
            user_id: fx.user_id,
            day_id: 9_999,
        }),
        Err(PlannerError::DayNotFound { id: 9_999 })
    ));
    assert!(matches!(
        fx.coordinator.delete_day(&DayRef {
            user_id: intruder,
            day_id: fx.days[0].id,
        }),
        Err(PlannerError::Forbidden { .. })
    ));
    assert_eq!(fx.store().trip_days(fx.trip_id).len(), 1);
}

#[test]
fn test_failed_day_deletion_rolls_back_everything() {
    let mut fx = fixture(4, Some(date(2025, 3, 30)));
    let doomed = fx.place(1, 0, None);
    let before = fx.store().trip_days(fx.trip_id);

    // item delete, then stage day 3, then fail while staging day 4
    fx.store_mut().inject_failure_after(2);
    let day_ref = fx.day_ref(1);
    let err = fx.coordinator.delete_day(&day_ref).unwrap_err();

    assert!(matches!(err, PlannerError::Conflict { .. }));
    assert_eq!(fx.store().trip_days(fx.trip_id), before);
    assert!(fx.store().item(doomed.id).is_some());
}

fn trip_ref(fx: &Fixture) -> TripRef {
    TripRef {
        user_id: fx.user_id,
        trip_id: fx.trip_id,
    }
}

#[test]
fn test_delete_trip_unplaces_saved_places() {
    let mut fx = fixture(2, Some(date(2025, 6, 1)));
    let (user_id, lone, shared) = (fx.user_id, fx.places[0], fx.places[1]);
    fx.store_mut().save_place(user_id, lone).unwrap();
    fx.store_mut().save_place(user_id, shared).unwrap();
    let first = fx.place(0, 0, None);
    let second = fx.place(1, 0, None);
    fx.place(1, 1, None);

    let other_trip = fx.store_mut().create_trip(user_id, "Madeira", None);
    let other_day = fx.store_mut().append_day(other_trip.id).unwrap();
    let survivor = fx
        .coordinator
        .place_item(&PlaceItem {
            user_id,
            day_id: other_day.id,
            place_id: shared,
            ..Default::default()
        })
        .unwrap();
    fx.place(1, 1, Some(0));

    let trip_ref = trip_ref(&fx);
    fx.coordinator.delete_trip(&trip_ref).unwrap();

    assert!(fx.store().trip(fx.trip_id).is_none());
    assert!(fx.store().trip_days(fx.trip_id).is_empty());
    assert!(fx.store().item(first.id).is_none());
    assert!(fx.store().item(second.id).is_none());
    assert_eq!(fx.store().item_count(), 1);

    let saved = fx.store().saved_place(user_id, lone).unwrap();
    assert!(!saved.is_placed);
    assert_eq!(saved.current_item_id, None);
    let saved = fx.store().saved_place(user_id, shared).unwrap();
    assert!(saved.is_placed);
    assert_eq!(saved.current_item_id, Some(survivor.id));
}

#[test]
fn test_delete_trip_failure_modes() {
    let mut fx = fixture(1, None);
    let intruder = fx.store_mut().create_user("mallory").id;

    assert!(matches!(
        fx.coordinator.delete_trip(&TripRef {
            user_id: fx.user_id,
            trip_id: 9_999,
        }),
        Err(PlannerError::TripNotFound { id: 9_999 })
    ));
    assert!(matches!(
        fx.coordinator.delete_trip(&TripRef {
            user_id: intruder,
            trip_id: fx.trip_id,
        }),
        Err(PlannerError::Forbidden { .. })
    ));
    assert!(fx.store().trip(fx.trip_id).is_some());
}

#[test]
fn test_failed_trip_deletion_rolls_back_everything() {
    let mut fx = fixture(2, None);
    let item = fx.place(0, 0, None);
    let (user_id, place_id) = (fx.user_id, fx.places[0]);
    fx.store_mut().save_place(user_id, place_id).unwrap();

    fx.store_mut().inject_failure_after(1);
    let trip_ref = trip_ref(&fx);
    let err = fx.coordinator.delete_trip(&trip_ref).unwrap_err();

    assert!(matches!(err, PlannerError::Conflict { .. }));
    assert!(fx.store().trip(fx.trip_id).is_some());
    assert_eq!(fx.store().trip_days(fx.trip_id).len(), 2);
    assert!(fx.store().item(item.id).is_some());
    assert_eq!(
        fx.store().saved_place(user_id, place_id).unwrap().current_item_id,
        Some(item.id)
    );
}

#[test]
fn test_inline_repair_at_precision_floor() {
    let mut fx = fixture(1, None);
    let day_id = fx.days[0].id;
    let (a, b) = (fx.places[0], fx.places[1]);
    let low = fx.store_mut().seed_item(day_id, a, r("1.0")).unwrap();
    let high = fx
        .store_mut()
        .seed_item(day_id, b, r("1.0000000001"))
        .unwrap();

    let inserted = fx.place(0, 2, Some(1));

    assert_eq!(fx.order(0), vec![low.id, inserted.id, high.id]);
    assert_eq!(fx.ranks(0), vec!["1.0", "1.5", "2.0"]);
}

#[test]
fn test_repeated_bisection_never_breaks_order() {
    let mut fx = fixture(1, None);
    let first = fx.place(0, 0, None);
    let last = fx.place(0, 1, None);

    // always insert right after the first item; the gap halves every time
    let mut inserted = Vec::new();
    for _ in 0..60 {
        inserted.push(fx.place(0, 2, Some(1)).id);
    }

    let order = fx.order(0);
    assert_eq!(order.len(), 62);
    assert_eq!(order[0], first.id);
    assert_eq!(order[61], last.id);
    // newest insert sits right after the first item
    assert_eq!(order[1], *inserted.last().unwrap());

    let ranks: Vec<Rank> = fx
        .store()
        .day_items(fx.days[0].id)
        .iter()
        .map(|item| item.rank)
        .collect();
    assert!(ranks.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_rebalance_day() {
    let mut fx = fixture(1, None);
    let day_id = fx.days[0].id;
    let (a, b, c) = (fx.places[0], fx.places[1], fx.places[2]);
    fx.store_mut().seed_item(day_id, a, r("0.25")).unwrap();
    fx.store_mut()
        .seed_item(day_id, b, r("0.2500000001"))
        .unwrap();
    fx.store_mut().seed_item(day_id, c, r("7.0")).unwrap();
    let before = fx.order(0);
    let day_ref = fx.day_ref(0);

    assert!(fx.coordinator.day_needs_rebalance(&day_ref).unwrap());
    let items = fx.coordinator.rebalance_day(&day_ref).unwrap();

    let ranks: Vec<String> = items.iter().map(|i| i.rank.to_string()).collect();
    assert_eq!(ranks, vec!["1.0", "2.0", "3.0"]);
    assert_eq!(fx.order(0), before);
    assert!(!fx.coordinator.day_needs_rebalance(&day_ref).unwrap());
}

#[test]
fn test_rebalance_checks_ownership() {
    let mut fx = fixture(1, None);
    let intruder = fx.store_mut().create_user("mallory").id;
    let day_ref = DayRef {
        user_id: intruder,
        day_id: fx.days[0].id,
    };

    assert!(matches!(
        fx.coordinator.rebalance_day(&day_ref),
        Err(PlannerError::Forbidden { .. })
    ));
    assert!(matches!(
        fx.coordinator.day_needs_rebalance(&day_ref),
        Err(PlannerError::Forbidden { .. })
    ));
}
