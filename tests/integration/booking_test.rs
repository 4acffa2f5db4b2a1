//! Integration tests for the booking lifecycle and room availability.

mod helpers;

use hotel_core::error::ErrorKind;
use hotel_core::types::{Money, PageRequest};
use hotel_entity::admin::AdminActionFilter;
use hotel_entity::booking::{BookingFilter, BookingStatus};
use hotel_entity::room::RoomStatus;
use hotel_service::{CreateBookingRequest, RoomTypeInput};
use uuid::Uuid;

use helpers::{TestApp, date, today};

#[tokio::test]
async fn test_overlapping_request_is_rejected_with_conflicts() {
    let app = TestApp::new().await;
    let existing = app
        .book_confirmed(&app.room_101, date(2024, 6, 1), date(2024, 6, 5))
        .await;

    let err = app
        .book(&app.other_ctx(), &app.room_101, date(2024, 6, 3), date(2024, 6, 7))
        .await
        .expect_err("overlap must be rejected");

    assert_eq!(err.kind, ErrorKind::Conflict);
    let details = err.details.expect("conflict details");
    let conflicts = details["conflicts"].as_array().expect("conflict list");
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["id"], existing.id.to_string());
    assert_eq!(conflicts[0]["status"], "confirmed");
}

#[tokio::test]
async fn test_adjacent_stays_do_not_conflict() {
    let app = TestApp::new().await;
    app.book_confirmed(&app.room_101, date(2024, 6, 1), date(2024, 6, 5))
        .await;

    let after = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 5), date(2024, 6, 8))
        .await;
    assert!(after.is_ok(), "check-in on the previous check-out day: {after:?}");

    let before = app
        .book(&app.other_ctx(), &app.room_101, date(2024, 5, 28), date(2024, 6, 1))
        .await;
    assert!(before.is_ok(), "check-out on the next check-in day: {before:?}");
}

#[tokio::test]
async fn test_availability_report() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 5))
        .await
        .expect("book");

    let report = app
        .state
        .availability
        .is_available(app.room_101.id, date(2024, 6, 4), date(2024, 6, 6))
        .await
        .expect("check");
    assert!(!report.available);
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(report.conflicts[0].id, booking.id);

    let touching = app
        .state
        .availability
        .is_available(app.room_101.id, date(2024, 6, 5), date(2024, 6, 6))
        .await
        .expect("check");
    assert!(touching.available);
    assert!(touching.conflicts.is_empty());

    let unknown = app
        .state
        .availability
        .is_available(Uuid::new_v4(), date(2024, 6, 5), date(2024, 6, 6))
        .await
        .expect_err("unknown room");
    assert_eq!(unknown.kind, ErrorKind::NotFound);

    let reversed = app
        .state
        .availability
        .is_available(app.room_101.id, date(2024, 6, 6), date(2024, 6, 5))
        .await
        .expect_err("reversed range");
    assert_eq!(reversed.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_dates() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 5))
        .await
        .expect("book");
    app.state
        .booking_ledger
        .cancel_booking(&app.guest_ctx(), booking.id, None)
        .await
        .expect("cancel");

    let rebooked = app
        .book(&app.other_ctx(), &app.room_101, date(2024, 6, 2), date(2024, 6, 4))
        .await;
    assert!(rebooked.is_ok());
}

#[tokio::test]
async fn test_date_validation() {
    let app = TestApp::new().await;

    let past = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 5, 19), date(2024, 5, 22))
        .await
        .expect_err("past check-in");
    assert_eq!(past.kind, ErrorKind::Validation);

    let empty = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 1))
        .await
        .expect_err("zero nights");
    assert_eq!(empty.kind, ErrorKind::Validation);

    let same_day = app
        .book(&app.guest_ctx(), &app.room_101, today(), date(2024, 5, 21))
        .await;
    assert!(same_day.is_ok(), "check-in today is allowed: {same_day:?}");
}

#[tokio::test]
async fn test_total_price_must_fit_the_ledger() {
    let app = TestApp::new().await;
    let admin = app.admin_ctx();
    let palace = app
        .state
        .room_type_service
        .create_room_type(
            &admin,
            RoomTypeInput {
                name: "Palace".to_string(),
                price: Money::from_cents(i64::MAX),
                capacity: 8,
                description: None,
            },
        )
        .await
        .expect("create type");
    let room = app
        .state
        .room_registry
        .create_room(&admin, "PH1", palace.id)
        .await
        .expect("create room");

    let one_night = app
        .book(&app.guest_ctx(), &room, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("a single night at the largest rate fits");
    assert_eq!(one_night.total_price, Money::from_cents(i64::MAX));
    let detail = app
        .state
        .booking_ledger
        .get_booking(&app.guest_ctx(), one_night.id)
        .await
        .expect("detail");
    assert_eq!(detail.booking.total_price, one_night.total_price);

    let err = app
        .book(&app.guest_ctx(), &room, date(2024, 6, 2), date(2024, 6, 4))
        .await
        .expect_err("two nights overflow");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(app.booking_status(one_night.id).await, BookingStatus::Pending);
}

#[tokio::test]
async fn test_price_defaults_to_nights_times_rate() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_201, date(2024, 6, 1), date(2024, 6, 4))
        .await
        .expect("book");
    assert_eq!(booking.total_price, Money::from_major(750));
    assert_eq!(booking.status, BookingStatus::Pending);

    let zero = app
        .state
        .booking_ledger
        .create_booking(
            &app.guest_ctx(),
            CreateBookingRequest {
                guest_id: None,
                room_id: app.room_102.id,
                check_in: date(2024, 6, 1),
                check_out: date(2024, 6, 2),
                total_price: Some(Money::ZERO),
                status: None,
            },
        )
        .await
        .expect_err("zero price");
    assert_eq!(zero.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_guest_books_only_for_themselves() {
    let app = TestApp::new().await;
    let request = CreateBookingRequest {
        guest_id: Some(app.other_guest.id),
        room_id: app.room_101.id,
        check_in: date(2024, 6, 1),
        check_out: date(2024, 6, 3),
        total_price: None,
        status: None,
    };

    let err = app
        .state
        .booking_ledger
        .create_booking(&app.guest_ctx(), request.clone())
        .await
        .expect_err("guest booking for someone else");
    assert_eq!(err.kind, ErrorKind::Authorization);

    let booking = app
        .state
        .booking_ledger
        .create_booking(&app.admin_ctx(), request)
        .await
        .expect("admin books on behalf of a guest");
    assert_eq!(booking.guest_id, app.other_guest.id);
}

#[tokio::test]
async fn test_unknown_guest_or_room() {
    let app = TestApp::new().await;

    let guest = app
        .state
        .booking_ledger
        .create_booking(
            &app.admin_ctx(),
            CreateBookingRequest {
                guest_id: Some(Uuid::new_v4()),
                room_id: app.room_101.id,
                check_in: date(2024, 6, 1),
                check_out: date(2024, 6, 3),
                total_price: None,
                status: None,
            },
        )
        .await
        .expect_err("unknown guest");
    assert_eq!(guest.kind, ErrorKind::NotFound);

    let room = app
        .state
        .booking_ledger
        .create_booking(
            &app.guest_ctx(),
            CreateBookingRequest {
                guest_id: None,
                room_id: Uuid::new_v4(),
                check_in: date(2024, 6, 1),
                check_out: date(2024, 6, 3),
                total_price: None,
                status: None,
            },
        )
        .await
        .expect_err("unknown room");
    assert_eq!(room.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_room_out_of_service_cannot_be_booked() {
    let app = TestApp::new().await;
    app.state
        .room_registry
        .set_room_status(
            &app.admin_ctx(),
            app.room_102.id,
            RoomStatus::Maintenance,
            false,
            Some("Leaking tap".to_string()),
        )
        .await
        .expect("maintenance");

    let err = app
        .book(&app.guest_ctx(), &app.room_102, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .expect_err("room in maintenance");
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_only_admin_creates_confirmed_bookings() {
    let app = TestApp::new().await;
    let err = app
        .state
        .booking_ledger
        .create_booking(
            &app.guest_ctx(),
            CreateBookingRequest {
                guest_id: None,
                room_id: app.room_101.id,
                check_in: date(2024, 6, 1),
                check_out: date(2024, 6, 3),
                total_price: None,
                status: Some(BookingStatus::Confirmed),
            },
        )
        .await
        .expect_err("guest confirmed booking");
    assert_eq!(err.kind, ErrorKind::Authorization);

    // Future check-in: confirmed, room untouched.
    let booking = app
        .book_confirmed(&app.room_101, date(2024, 6, 1), date(2024, 6, 3))
        .await;
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Available);
}

#[tokio::test]
async fn test_completing_an_in_house_stay_marks_room_for_cleaning() {
    let app = TestApp::new().await;
    let booking = app
        .book_confirmed(&app.room_101, today(), date(2024, 5, 23))
        .await;
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Occupied);

    let completed = app
        .state
        .booking_ledger
        .transition_status(&app.admin_ctx(), booking.id, BookingStatus::Completed)
        .await
        .expect("complete");
    assert_eq!(completed.status, BookingStatus::Completed);
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Cleaning);

    let err = app
        .state
        .booking_ledger
        .transition_status(&app.admin_ctx(), booking.id, BookingStatus::Cancelled)
        .await
        .expect_err("terminal booking");
    assert_eq!(err.kind, ErrorKind::State);
    assert_eq!(app.booking_status(booking.id).await, BookingStatus::Completed);
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Cleaning);
}

#[tokio::test]
async fn test_owner_cancels_and_stranger_cannot() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, today(), date(2024, 5, 22))
        .await
        .expect("book");

    let err = app
        .state
        .booking_ledger
        .cancel_booking(&app.other_ctx(), booking.id, None)
        .await
        .expect_err("stranger cancels");
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(app.booking_status(booking.id).await, BookingStatus::Pending);

    let cancelled = app
        .state
        .booking_ledger
        .cancel_booking(&app.guest_ctx(), booking.id, None)
        .await
        .expect("owner cancels");
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Available);
}

#[tokio::test]
async fn test_guest_cannot_confirm_own_booking() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("book");

    let err = app
        .state
        .booking_ledger
        .transition_status(&app.guest_ctx(), booking.id, BookingStatus::Confirmed)
        .await
        .expect_err("guest confirms");
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_confirming_today_occupies_and_no_show_releases() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_102, today(), date(2024, 5, 21))
        .await
        .expect("book");
    assert_eq!(app.room_status(app.room_102.id).await, RoomStatus::Available);

    app.state
        .booking_ledger
        .transition_status(&app.admin_ctx(), booking.id, BookingStatus::Confirmed)
        .await
        .expect("confirm");
    assert_eq!(app.room_status(app.room_102.id).await, RoomStatus::Occupied);

    app.state
        .booking_ledger
        .transition_status(&app.admin_ctx(), booking.id, BookingStatus::NoShow)
        .await
        .expect("no-show");
    assert_eq!(app.room_status(app.room_102.id).await, RoomStatus::Available);
    assert_eq!(app.booking_status(booking.id).await, BookingStatus::NoShow);
}

#[tokio::test]
async fn test_releasing_a_future_booking_keeps_in_house_guest() {
    let app = TestApp::new().await;
    let later = app
        .book(&app.other_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 3))
        .await
        .expect("book");
    let skipped = app
        .book(&app.other_ctx(), &app.room_101, date(2024, 6, 5), date(2024, 6, 6))
        .await
        .expect("book");
    app.book_confirmed(&app.room_101, today(), date(2024, 5, 22))
        .await;
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Occupied);

    app.state
        .booking_ledger
        .cancel_booking(&app.other_ctx(), later.id, None)
        .await
        .expect("cancel");
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Occupied);

    app.state
        .booking_ledger
        .transition_status(&app.admin_ctx(), skipped.id, BookingStatus::NoShow)
        .await
        .expect("no-show");
    assert_eq!(app.room_status(app.room_101.id).await, RoomStatus::Occupied);
}

#[tokio::test]
async fn test_illegal_transition_is_state_error() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("book");

    let err = app
        .state
        .booking_ledger
        .transition_status(&app.admin_ctx(), booking.id, BookingStatus::Completed)
        .await
        .expect_err("pending cannot complete");
    assert_eq!(err.kind, ErrorKind::State);
    assert_eq!(app.booking_status(booking.id).await, BookingStatus::Pending);
}

#[tokio::test]
async fn test_admin_cancellation_is_logged_with_reason() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("book");

    app.state
        .booking_ledger
        .cancel_booking(&app.admin_ctx(), booking.id, Some("Guest called".to_string()))
        .await
        .expect("admin cancels");

    let actions = app
        .state
        .admin_action_service
        .list_actions(
            &app.admin_ctx(),
            AdminActionFilter {
                action_type: Some("booking.cancel".to_string()),
                ..AdminActionFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .expect("list actions");
    assert_eq!(actions.items.len(), 1);
    let action = &actions.items[0];
    assert_eq!(action.admin_id, app.admin.id);
    assert_eq!(action.target_id, booking.id);
    assert_eq!(action.detail.0["reason"], "Guest called");
    assert_eq!(action.detail.0["from"], "pending");
    assert_eq!(action.detail.0["to"], "cancelled");
}

#[tokio::test]
async fn test_owner_cancellation_is_not_logged() {
    let app = TestApp::new().await;
    let booking = app
        .book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("book");
    app.state
        .booking_ledger
        .cancel_booking(&app.guest_ctx(), booking.id, Some("Changed plans".to_string()))
        .await
        .expect("cancel");

    let actions = app
        .state
        .admin_action_service
        .list_actions(&app.admin_ctx(), AdminActionFilter::default(), PageRequest::default())
        .await
        .expect("list actions");
    assert!(actions.items.is_empty());
}

#[tokio::test]
async fn test_guests_list_only_their_bookings() {
    let app = TestApp::new().await;
    app.book(&app.guest_ctx(), &app.room_101, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("book");
    app.book(&app.other_ctx(), &app.room_102, date(2024, 6, 1), date(2024, 6, 2))
        .await
        .expect("book");

    let mine = app
        .state
        .booking_ledger
        .list_bookings(&app.guest_ctx(), BookingFilter::default(), PageRequest::default())
        .await
        .expect("list");
    assert_eq!(mine.total_items, 1);
    assert!(mine.items.iter().all(|b| b.guest_id == app.guest.id));

    let all = app
        .state
        .booking_ledger
        .list_bookings(&app.admin_ctx(), BookingFilter::default(), PageRequest::default())
        .await
        .expect("list");
    assert_eq!(all.total_items, 2);

    let by_room = app
        .state
        .booking_ledger
        .list_bookings(
            &app.admin_ctx(),
            BookingFilter {
                room_id: Some(app.room_102.id),
                ..BookingFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .expect("list");
    assert_eq!(by_room.total_items, 1);
    assert_eq!(by_room.items[0].guest_id, app.other_guest.id);
}

#[tokio::test]
async fn test_racing_requests_for_the_same_dates() {
    let app = TestApp::new().await;
    let guest = app.guest_ctx();
    let other = app.other_ctx();

    let (first, second) = tokio::join!(
        app.book(&guest, &app.room_101, date(2024, 6, 1), date(2024, 6, 4)),
        app.book(&other, &app.room_101, date(2024, 6, 2), date(2024, 6, 5)),
    );

    let outcomes = [first, second];
    let won = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicted = outcomes
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind == ErrorKind::Conflict))
        .count();
    assert_eq!(won, 1);
    assert_eq!(conflicted, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_requests_on_a_shared_file_yield_one_booking() {
    let app = TestApp::file_backed(8).await;
    let contexts = [app.guest_ctx(), app.other_ctx()];

    let mut handles = Vec::new();
    for i in 0..16 {
        let ledger = app.state.booking_ledger.clone();
        let ctx = contexts[i % 2].clone();
        let room_id = app.room_101.id;
        handles.push(tokio::spawn(async move {
            ledger
                .create_booking(
                    &ctx,
                    CreateBookingRequest {
                        guest_id: None,
                        room_id,
                        check_in: date(2024, 6, 1),
                        check_out: date(2024, 6, 4),
                        total_price: None,
                        status: None,
                    },
                )
                .await
        }));
    }

    let mut won = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => won += 1,
            Err(e) => assert_eq!(e.kind, ErrorKind::Conflict, "unexpected error: {e}"),
        }
    }
    assert_eq!(won, 1);

    let stored = app
        .state
        .booking_ledger
        .list_bookings(
            &app.admin_ctx(),
            BookingFilter {
                room_id: Some(app.room_101.id),
                ..BookingFilter::default()
            },
            PageRequest::default(),
        )
        .await
        .expect("list");
    assert_eq!(stored.total_items, 1);
}

#[tokio::test]
async fn test_active_bookings_never_overlap() {
    let app = TestApp::new().await;
    let ctx = app.guest_ctx();

    for start in 0..8u64 {
        for nights in 1..4u64 {
            let check_in = date(2024, 6, 1) + chrono::Days::new(start);
            let check_out = check_in + chrono::Days::new(nights);
            let _ = app.book(&ctx, &app.room_101, check_in, check_out).await;
        }
    }

    let bookings = app
        .state
        .booking_ledger
        .list_bookings(
            &app.admin_ctx(),
            BookingFilter {
                room_id: Some(app.room_101.id),
                ..BookingFilter::default()
            },
            PageRequest::new(1, 100),
        )
        .await
        .expect("list")
        .items;
    assert!(!bookings.is_empty());

    for (i, a) in bookings.iter().enumerate() {
        for b in bookings.iter().skip(i + 1) {
            let overlap = a.check_in < b.check_out && b.check_in < a.check_out;
            assert!(!overlap, "{} and {} overlap", a.id, b.id);
        }
    }
}
