//! HTTP-level tests: routing, caller identity, envelopes and status codes.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::TestApp;

#[tokio::test]
async fn test_health_needs_no_caller() {
    let app = TestApp::new().await;
    let res = app.request("GET", "/api/health", None, None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["status"], "ok");
    assert_eq!(res.data()["database"], "connected");
}

#[tokio::test]
async fn test_missing_or_bad_caller_is_unauthenticated() {
    let app = TestApp::new().await;

    let res = app.request("GET", "/api/bookings", None, None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error_code(), "AUTHENTICATION_ERROR");

    let res = app
        .raw_request("GET", "/api/bookings", String::new(), Some("not-a-uuid".to_string()))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .request("GET", "/api/bookings", None, Some(Uuid::new_v4()))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.error_code(), "AUTHENTICATION_ERROR");
}

#[tokio::test]
async fn test_create_and_read_booking() {
    let app = TestApp::new().await;
    let body = json!({
        "room_id": app.room_101.id,
        "check_in": "2024-06-01",
        "check_out": "2024-06-04",
    });

    let res = app
        .request("POST", "/api/bookings", Some(body), Some(app.guest.id))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["success"], true);
    assert_eq!(res.data()["status"], "pending");
    assert_eq!(res.data()["total_price"], "300.00");
    assert_eq!(res.data()["guest_id"], app.guest.id.to_string());

    let id = res.data()["id"].as_str().expect("id").to_string();
    let res = app
        .request("GET", &format!("/api/bookings/{id}"), None, Some(app.guest.id))
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .request("GET", &format!("/api/bookings/{id}"), None, Some(app.other_guest.id))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.error_code(), "AUTHORIZATION_ERROR");

    let res = app
        .request(
            "GET",
            &format!("/api/bookings/{}", Uuid::new_v4()),
            None,
            Some(app.guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_overlap_returns_conflict_details() {
    let app = TestApp::new().await;
    let existing = app
        .book(
            &app.guest_ctx(),
            &app.room_101,
            helpers::date(2024, 6, 1),
            helpers::date(2024, 6, 5),
        )
        .await
        .expect("book");

    let body = json!({
        "room_id": app.room_101.id,
        "check_in": "2024-06-03",
        "check_out": "2024-06-06",
    });
    let res = app
        .request("POST", "/api/bookings", Some(body), Some(app.other_guest.id))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.error_code(), "CONFLICT");
    let conflicts = res.body["details"]["conflicts"]
        .as_array()
        .expect("conflicts");
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["id"], existing.id.to_string());
}

#[tokio::test]
async fn test_terminal_transition_is_unprocessable() {
    let app = TestApp::new().await;
    let booking = app
        .book(
            &app.guest_ctx(),
            &app.room_102,
            helpers::date(2024, 6, 1),
            helpers::date(2024, 6, 2),
        )
        .await
        .expect("book");

    let res = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking.id),
            Some(json!({})),
            Some(app.guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["status"], "cancelled");

    let res = app
        .request(
            "PATCH",
            &format!("/api/bookings/{}/status", booking.id),
            Some(json!({ "status": "confirmed" })),
            Some(app.admin.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.error_code(), "STATE_ERROR");
}

#[tokio::test]
async fn test_bad_input_is_bad_request() {
    let app = TestApp::new().await;

    let reversed = json!({
        "room_id": app.room_101.id,
        "check_in": "2024-06-04",
        "check_out": "2024-06-01",
    });
    let res = app
        .request("POST", "/api/bookings", Some(reversed), Some(app.guest.id))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");

    let res = app
        .raw_request(
            "POST",
            "/api/bookings",
            "{\"room_id\": ".to_string(),
            Some(app.guest.id.to_string()),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");

    let oversized = json!({
        "room_id": app.room_101.id,
        "check_in": "2024-06-01",
        "check_out": "2024-06-04",
        "total_price": "100000000000000000000",
    });
    let res = app
        .request("POST", "/api/bookings", Some(oversized), Some(app.guest.id))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");

    let res = app
        .request("GET", "/api/bookings/not-a-uuid", None, Some(app.guest.id))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let booking = app
        .book(
            &app.guest_ctx(),
            &app.room_101,
            helpers::date(2024, 6, 1),
            helpers::date(2024, 6, 2),
        )
        .await
        .expect("book");
    let res = app
        .request(
            "POST",
            &format!("/api/bookings/{}/payments", booking.id),
            Some(json!({ "amount": "10.005", "method": "cash" })),
            Some(app.guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_payment_flow_confirms_booking() {
    let app = TestApp::new().await;
    let booking = app
        .book(
            &app.guest_ctx(),
            &app.room_201,
            helpers::date(2024, 6, 1),
            helpers::date(2024, 6, 3),
        )
        .await
        .expect("book");
    let path = format!("/api/bookings/{}/payments", booking.id);

    let res = app
        .request(
            "POST",
            &path,
            Some(json!({ "amount": "200.00", "method": "credit_card" })),
            Some(app.guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["booking_status"], "pending");
    assert_eq!(res.data()["payment_summary"]["balance"], "300.00");

    let res = app
        .request(
            "POST",
            &path,
            Some(json!({ "amount": 300, "method": "cash" })),
            Some(app.guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["booking_status"], "confirmed");
    assert_eq!(res.data()["payment_summary"]["fully_paid"], true);

    let res = app
        .request(
            "POST",
            &path,
            Some(json!({ "amount": "0.01", "method": "cash" })),
            Some(app.guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app.request("GET", &path, None, Some(app.guest.id)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["payments"].as_array().expect("payments").len(), 2);
    assert_eq!(res.data()["payment_summary"]["total_paid"], "500.00");
}

#[tokio::test]
async fn test_room_management_requires_admin() {
    let app = TestApp::new().await;
    let body = json!({ "room_number": "301", "room_type_id": app.suite.id });

    let res = app
        .request("POST", "/api/rooms", Some(body.clone()), Some(app.guest.id))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .request("POST", "/api/rooms", Some(body), Some(app.admin.id))
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.data()["room_number"], "301");
    assert_eq!(res.data()["status"], "available");

    let res = app
        .request(
            "PATCH",
            &format!("/api/rooms/{}/status", app.room_102.id),
            Some(json!({ "status": "maintenance", "reason": "Repainting" })),
            Some(app.admin.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["status"], "maintenance");
}

#[tokio::test]
async fn test_availability_and_search_endpoints() {
    let app = TestApp::new().await;
    app.book(
        &app.guest_ctx(),
        &app.room_101,
        helpers::date(2024, 6, 1),
        helpers::date(2024, 6, 4),
    )
    .await
    .expect("book");

    let res = app
        .request(
            "GET",
            &format!(
                "/api/rooms/{}/availability?check_in=2024-06-03&check_out=2024-06-05",
                app.room_101.id
            ),
            None,
            Some(app.other_guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["available"], false);

    let res = app
        .request(
            "GET",
            "/api/rooms/available?check_in=2024-06-02&check_out=2024-06-03&min_capacity=2",
            None,
            Some(app.other_guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let numbers: Vec<&str> = res
        .data()
        .as_array()
        .expect("rooms")
        .iter()
        .filter_map(|r| r["room_number"].as_str())
        .collect();
    assert_eq!(numbers, vec!["102", "201"]);

    let res = app
        .request(
            "GET",
            "/api/rooms/available?check_in=tomorrow&check_out=2024-06-03",
            None,
            Some(app.other_guest.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_action_log_endpoint() {
    let app = TestApp::new().await;
    let booking = app
        .book(
            &app.guest_ctx(),
            &app.room_101,
            helpers::date(2024, 6, 1),
            helpers::date(2024, 6, 2),
        )
        .await
        .expect("book");
    let res = app
        .request(
            "POST",
            &format!("/api/bookings/{}/cancel", booking.id),
            Some(json!({ "reason": "Duplicate" })),
            Some(app.admin.id),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .request("GET", "/api/admin/actions", None, Some(app.guest.id))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .request("GET", "/api/admin/actions", None, Some(app.admin.id))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let items = res.data()["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["action_type"], "booking.cancel");
    assert_eq!(items[0]["detail"]["reason"], "Duplicate");
}
