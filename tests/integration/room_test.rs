//! Integration tests for the room registry, room types and the catalog.

mod helpers;

use std::sync::Arc;

use async_trait::async_trait;
use hotel_core::error::{AppError, ErrorKind};
use hotel_core::result::AppResult;
use hotel_core::traits::{ActionLogSink, AdminActionRecord};
use hotel_core::types::{Money, PageRequest};
use hotel_entity::admin::AdminActionFilter;
use hotel_entity::booking::BookingStatus;
use hotel_entity::room::RoomStatus;
use hotel_service::RoomTypeInput;
use uuid::Uuid;

use helpers::{TestApp, date, today};

/// Sink that always fails, standing in for an unavailable log store.
#[derive(Debug)]
struct FailingSink;

#[async_trait]
impl ActionLogSink for FailingSink {
    async fn log(&self, _record: AdminActionRecord) -> AppResult<()> {
        Err(AppError::database("action log unavailable"))
    }
}

#[tokio::test]
async fn test_override_rejected_while_guest_in_house() {
    let app = TestApp::new().await;
    app.book_confirmed(&app.room_101, today(), date(2024, 5, 22))
        .await;
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Occupied);

    let err = app
        .state
        .room_registry
        .set_room_status(&app.admin_ctx(), app.room_101.id, RoomStatus::Available, false, None)
        .await
        .expect_err("desync without force");
    assert_eq!(err.kind, ErrorKind::State);
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Occupied);

    let room = app
        .state
        .room_registry
        .set_room_status(
            &app.admin_ctx(),
            app.room_101.id,
            RoomStatus::Maintenance,
            true,
            Some("Burst pipe".to_string()),
        )
        .await
        .expect("forced override");
    assert_eq!(room.status, RoomStatus::Maintenance);
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Maintenance);

    let actions = app
        .state
        .admin_action_service
        .list_actions(
            &app.admin_ctx(),
            AdminActionFilter {
                target_id: Some(app.room_101.id),
                ..AdminActionFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .expect("actions");
    assert_eq!(actions.items.len(), 1);
    let detail = &actions.items[0].detail.0;
    assert_eq!(actions.items[0].action_type, "room.status_override");
    assert_eq!(detail["forced"], true);
    assert_eq!(detail["from"], "occupied");
    assert_eq!(detail["to"], "maintenance");
    assert_eq!(detail["reason"], "Burst pipe");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_override_racing_a_same_day_confirmation_keeps_room_occupied() {
    let app = TestApp::file_backed(4).await;
    let room_id = app.room_102.id;

    for round in 0..10 {
        app.state
            .room_registry
            .set_room_status(&app.admin_ctx(), room_id, RoomStatus::Available, false, None)
            .await
            .expect("reset room");
        let booking = app
            .book(&app.guest_ctx(), &app.room_102, today(), date(2024, 5, 21))
            .await
            .expect("book");

        let ledger = app.state.booking_ledger.clone();
        let registry = app.state.room_registry.clone();
        let (admin_a, admin_b) = (app.admin_ctx(), app.admin_ctx());
        let confirm = tokio::spawn(async move {
            ledger
                .transition_status(&admin_a, booking.id, BookingStatus::Confirmed)
                .await
        });
        let override_ = tokio::spawn(async move {
            registry
                .set_room_status(&admin_b, room_id, RoomStatus::Cleaning, false, None)
                .await
        });

        confirm
            .await
            .expect("task panicked")
            .expect("confirmation");
        if let Err(e) = override_.await.expect("task panicked") {
            assert_eq!(e.kind, ErrorKind::State, "round {round}: {e}");
        }
        assert_eq!(
            app.room_status(room_id).await,
            RoomStatus::Occupied,
            "round {round}"
        );

        app.state
            .booking_ledger
            .transition_status(&app.admin_ctx(), booking.id, BookingStatus::Completed)
            .await
            .expect("complete");
    }
}

#[tokio::test]
async fn test_occupied_requires_in_house_booking() {
    let app = TestApp::new().await;

    let err = app
        .state
        .room_registry
        .set_room_status(&app.admin_ctx(), app.room_102.id, RoomStatus::Occupied, false, None)
        .await
        .expect_err("no guest in house");
    assert_eq!(err.kind, ErrorKind::State);

    let room = app
        .state
        .room_registry
        .set_room_status(&app.admin_ctx(), app.room_102.id, RoomStatus::Occupied, true, None)
        .await
        .expect("forced");
    assert_eq!(room.status, RoomStatus::Occupied);
}

#[tokio::test]
async fn test_override_in_step_with_bookings_is_logged_unforced() {
    let app = TestApp::new().await;
    app.state
        .room_registry
        .set_room_status(&app.admin_ctx(), app.room_102.id, RoomStatus::Cleaning, false, None)
        .await
        .expect("override");

    let actions = app
        .state
        .admin_action_service
        .list_actions(&app.admin_ctx(), AdminActionFilter::default(), PageRequest::default())
        .await
        .expect("actions");
    assert_eq!(actions.items.len(), 1);
    assert_eq!(actions.items[0].detail.0["forced"], false);
}

#[tokio::test]
async fn test_guest_cannot_override_or_manage_rooms() {
    let app = TestApp::new().await;

    let err = app
        .state
        .room_registry
        .set_room_status(&app.guest_ctx(), app.room_102.id, RoomStatus::Cleaning, false, None)
        .await
        .expect_err("guest override");
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .state
        .room_registry
        .create_room(&app.guest_ctx(), "301", app.standard.id)
        .await
        .expect_err("guest creates room");
    assert_eq!(err.kind, ErrorKind::Authorization);

    let err = app
        .state
        .admin_action_service
        .list_actions(&app.guest_ctx(), AdminActionFilter::default(), PageRequest::default())
        .await
        .expect_err("guest reads log");
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_room_crud_rules() {
    let app = TestApp::new().await;
    let admin = app.admin_ctx();

    let dup = app
        .state
        .room_registry
        .create_room(&admin, "101", app.standard.id)
        .await
        .expect_err("duplicate number");
    assert_eq!(dup.kind, ErrorKind::Conflict);

    let unknown = app
        .state
        .room_registry
        .create_room(&admin, "301", Uuid::new_v4())
        .await
        .expect_err("unknown type");
    assert_eq!(unknown.kind, ErrorKind::NotFound);

    let room = app
        .state
        .room_registry
        .create_room(&admin, " 301 ", app.suite.id)
        .await
        .expect("create");
    assert_eq!(room.room_number, "301");
    assert_eq!(room.status, RoomStatus::Available);

    let updated = app
        .state
        .room_registry
        .update_room(&admin, room.id, "302", app.standard.id)
        .await
        .expect("update");
    assert_eq!(updated.room_number, "302");
    assert_eq!(updated.room_type_id, app.standard.id);

    let clash = app
        .state
        .room_registry
        .update_room(&admin, room.id, "102", app.standard.id)
        .await
        .expect_err("renumber onto existing");
    assert_eq!(clash.kind, ErrorKind::Conflict);

    let by_number = app
        .state
        .room_registry
        .get_room_by_number("302")
        .await
        .expect("lookup");
    assert_eq!(by_number.id, room.id);

    app.state
        .room_registry
        .delete_room(&admin, room.id)
        .await
        .expect("delete unbooked room");
    let gone = app
        .state
        .room_registry
        .get_room(room.id)
        .await
        .expect_err("deleted");
    assert_eq!(gone.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_room_with_bookings_cannot_be_deleted() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("book");
    app.state
        .booking_ledger
        .cancel_booking(&app.guest_ctx(), booking.id, None)
        .await
        .expect("cancel");

    let err = app
        .state
        .room_registry
        .delete_room(&app.admin_ctx(), app.room_101.id)
        .await
        .expect_err("referenced room");
    assert_eq!(err.kind, ErrorKind::State);
    assert_eq!(err.details.expect("details")["booking_count"], 1);
}

#[tokio::test]
async fn test_list_rooms_filters() {
    let app = TestApp::new().await;
    app.state
        .room_registry
        .set_room_status(&app.admin_ctx(), app.room_102.id, RoomStatus::Maintenance, false, None)
        .await
        .expect("override");

    let maintenance = app
        .state
        .room_registry
        .list_rooms(Some(RoomStatus::Maintenance), None, PageRequest::default())
        .await
        .expect("list");
    assert_eq!(maintenance.total_items, 1);
    assert_eq!(maintenance.items[0].id, app.room_102.id);

    let suites = app
        .state
        .room_registry
        .list_rooms(None, Some(app.suite.id), PageRequest::default())
        .await
        .expect("list");
    assert_eq!(suites.total_items, 1);
    assert_eq!(suites.items[0].room_number, "201");
}

#[tokio::test]
async fn test_room_type_delete_guards() {
    let app = TestApp::new().await;
    let admin = app.admin_ctx();

    let err = app
        .state
        .room_type_service
        .delete_room_type(&admin, app.standard.id)
        .await
        .expect_err("type with rooms");
    assert_eq!(err.kind, ErrorKind::State);
    assert_eq!(err.details.expect("details")["rooms"], 2);

    let loft = app
        .state
        .room_type_service
        .create_room_type(
            &admin,
            RoomTypeInput {
                name: "Loft".to_string(),
                price: Money::from_major(180),
                capacity: 3,
                description: None,
            },
        )
        .await
        .expect("create type");
    let wifi = app
        .state
        .catalog_service
        .create_amenity(&admin, "Wi-Fi", Some("Fibre"))
        .await
        .expect("amenity");
    app.state
        .room_type_service
        .attach_amenity(&admin, loft.id, wifi.id)
        .await
        .expect("attach");

    let err = app
        .state
        .room_type_service
        .delete_room_type(&admin, loft.id)
        .await
        .expect_err("type with amenity link");
    assert_eq!(err.kind, ErrorKind::State);

    let err = app
        .state
        .catalog_service
        .delete_amenity(&admin, wifi.id)
        .await
        .expect_err("attached amenity");
    assert_eq!(err.kind, ErrorKind::State);

    app.state
        .room_type_service
        .detach_amenity(&admin, loft.id, wifi.id)
        .await
        .expect("detach");
    let err = app
        .state
        .room_type_service
        .detach_amenity(&admin, loft.id, wifi.id)
        .await
        .expect_err("detach twice");
    assert_eq!(err.kind, ErrorKind::NotFound);

    app.state
        .room_type_service
        .delete_room_type(&admin, loft.id)
        .await
        .expect("delete unreferenced type");
    app.state
        .catalog_service
        .delete_amenity(&admin, wifi.id)
        .await
        .expect("delete unattached amenity");
}

#[tokio::test]
async fn test_room_type_validation() {
    let app = TestApp::new().await;
    let admin = app.admin_ctx();

    let err = app
        .state
        .room_type_service
        .create_room_type(
            &admin,
            RoomTypeInput {
                name: "Closet".to_string(),
                price: Money::ZERO,
                capacity: 1,
                description: None,
            },
        )
        .await
        .expect_err("free room");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = app
        .state
        .room_type_service
        .create_room_type(
            &admin,
            RoomTypeInput {
                name: "Standard".to_string(),
                price: Money::from_major(90),
                capacity: 2,
                description: None,
            },
        )
        .await
        .expect_err("duplicate name");
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_included_service_carries_no_discount() {
    let app = TestApp::new().await;
    let admin = app.admin_ctx();
    let breakfast = app
        .state
        .catalog_service
        .create_service(&admin, "Breakfast", Money::from_major(15), None)
        .await
        .expect("service");

    let link = app
        .state
        .room_type_service
        .attach_service(&admin, app.suite.id, breakfast.id, true, 30)
        .await
        .expect("attach");
    assert!(link.included);
    assert_eq!(link.discount_percentage, 0);

    let updated = app
        .state
        .room_type_service
        .attach_service(&admin, app.suite.id, breakfast.id, false, 25)
        .await
        .expect("update terms");
    assert_eq!(updated.discount_percentage, 25);

    let err = app
        .state
        .room_type_service
        .attach_service(&admin, app.suite.id, breakfast.id, false, 150)
        .await
        .expect_err("discount out of range");
    assert_eq!(err.kind, ErrorKind::Validation);

    let detail = app
        .state
        .room_type_service
        .get_room_type(app.suite.id)
        .await
        .expect("detail");
    assert_eq!(detail.services.len(), 1);
    assert_eq!(detail.services[0].name, "Breakfast");
    assert!(!detail.services[0].included);
    assert_eq!(detail.services[0].discount_percentage, 25);

    let err = app
        .state
        .catalog_service
        .delete_service(&admin, breakfast.id)
        .await
        .expect_err("attached service");
    assert_eq!(err.kind, ErrorKind::State);

    app.state
        .room_type_service
        .detach_service(&admin, app.suite.id, breakfast.id)
        .await
        .expect("detach");
    app.state
        .catalog_service
        .delete_service(&admin, breakfast.id)
        .await
        .expect("delete");
}

#[tokio::test]
async fn test_search_orders_by_price_then_number() {
    let app = TestApp::new().await;

    let rooms = app
        .state
        .availability
        .search_available(date(2024, 6, 1), date(2024, 6, 3), None)
        .await
        .expect("search");
    let numbers: Vec<&str> = rooms.iter().map(|r| r.room_number.as_str()).collect();
    assert_eq!(numbers, vec!["101", "102", "201"]);
    assert_eq!(rooms[0].price, Money::from_major(100));
    assert_eq!(rooms[2].room_type_name, "Suite");

    let big = app
        .state
        .availability
        .search_available(date(2024, 6, 1), date(2024, 6, 3), Some(3))
        .await
        .expect("search");
    assert_eq!(big.len(), 1);
    assert_eq!(big[0].id, app.room_201.id);
}

#[tokio::test]
async fn test_search_excludes_booked_and_out_of_service_rooms() {
    let app = TestApp::new().await;
    app.book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 4))
        .await
        .expect("book");
    app.state
        .room_registry
        .set_room_status(&app.admin_ctx(), app.room_102.id, RoomStatus::Maintenance, false, None)
        .await
        .expect("override");

    let rooms = app
        .state
        .availability
        .search_available(date(2024, 6, 2), date(2024, 6, 3), None)
        .await
        .expect("search");
    let ids: Vec<Uuid> = rooms.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![app.room_201.id]);

    let later = app
        .state
        .availability
        .search_available(date(2024, 6, 4), date(2024, 6, 5), None)
        .await
        .expect("search");
    assert!(later.iter().any(|r| r.id == app.room_101.id));

    let err = app
        .state
        .availability
        .search_available(date(2024, 6, 4), date(2024, 6, 5), Some(0))
        .await
        .expect_err("capacity zero");
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_log_failure_does_not_undo_cancellation() {
    let app = TestApp::with_action_log(Arc::new(FailingSink)).await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, today(), date(2024, 5, 22))
        .await
        .expect("book");

    let cancelled = app
        .state
        .booking_ledger
        .cancel_booking(&app.admin_ctx(), booking.id, Some("Overbooked".to_string()))
        .await
        .expect("cancel despite log failure");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(app.booking_status(booking.id).await, BookingStatus::Cancelled);
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Available);

    app.state
        .room_registry
        .set_room_status(&app.admin_ctx(), app.room_101.id, RoomStatus::Cleaning, false, None)
        .await
        .expect("override despite log failure");
}
