//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use hotel_api::{AppState, build_app};
use hotel_core::config::AppConfig;
use hotel_core::error::AppError;
use hotel_core::traits::{ActionLogSink, Clock, FixedClock};
use hotel_core::types::Money;
use hotel_database::DatabasePool;
use hotel_entity::booking::{Booking, BookingStatus};
use hotel_entity::room::{Room, RoomStatus, RoomType};
use hotel_entity::user::{CreateUser, User, UserRole};
use hotel_service::{CreateBookingRequest, RequestContext, RoomTypeInput};

/// Builds a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// The date the test clock starts on.
pub fn today() -> NaiveDate {
    date(2024, 5, 20)
}

/// Test application context
pub struct TestApp {
    /// Wired services
    pub state: AppState,
    /// The Axum router for making test requests
    pub router: Router,
    /// Settable clock shared by every service
    pub clock: Arc<FixedClock>,
    pub admin: User,
    pub guest: User,
    pub other_guest: User,
    /// Room type "Standard": 100.00 per night, 2 guests
    pub standard: RoomType,
    /// Room type "Suite": 250.00 per night, 4 guests
    pub suite: RoomType,
    /// Standard room
    pub room_101: Room,
    /// Standard room
    pub room_102: Room,
    /// Suite
    pub room_201: Room,
    /// Keeps a file-backed database alive for the app's lifetime
    _db_dir: Option<TempDir>,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory database.
    pub async fn new() -> Self {
        Self::build(AppConfig::in_memory(), None, None).await
    }

    /// Like [`TestApp::new`] with a custom admin action sink.
    pub async fn with_action_log(sink: Arc<dyn ActionLogSink>) -> Self {
        Self::build(AppConfig::in_memory(), None, Some(sink)).await
    }

    /// A test application over a WAL database file in a temporary directory,
    /// with a pool of `max_connections` so transactions really run in parallel.
    pub async fn file_backed(max_connections: u32) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut config = AppConfig::in_memory();
        config.database.url = format!("sqlite://{}", dir.path().join("hotel.db").display());
        config.database.max_connections = max_connections;
        config.database.min_connections = max_connections;
        Self::build(config, Some(dir), None).await
    }

    async fn build(
        config: AppConfig,
        db_dir: Option<TempDir>,
        sink: Option<Arc<dyn ActionLogSink>>,
    ) -> Self {
        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        hotel_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let clock = Arc::new(FixedClock::at_date(today()));
        let shared_clock: Arc<dyn Clock> = clock.clone();
        let state = match sink {
            Some(sink) => AppState::with_action_log(config, db, shared_clock, sink),
            None => AppState::new(config, db, shared_clock),
        };

        let admin = create_user(&state, "admin", UserRole::Admin).await;
        let guest = create_user(&state, "alice", UserRole::Guest).await;
        let other_guest = create_user(&state, "bob", UserRole::Guest).await;
        let admin_ctx = RequestContext::for_user(&admin);

        let standard = state
            .room_type_service
            .create_room_type(
                &admin_ctx,
                RoomTypeInput {
                    name: "Standard".to_string(),
                    price: Money::from_major(100),
                    capacity: 2,
                    description: Some("Queen bed".to_string()),
                },
            )
            .await
            .expect("Failed to create room type");
        let suite = state
            .room_type_service
            .create_room_type(
                &admin_ctx,
                RoomTypeInput {
                    name: "Suite".to_string(),
                    price: Money::from_major(250),
                    capacity: 4,
                    description: None,
                },
            )
            .await
            .expect("Failed to create room type");

        let mut rooms = Vec::new();
        for (number, room_type) in [("101", &standard), ("102", &standard), ("201", &suite)] {
            let room = state
                .room_registry
                .create_room(&admin_ctx, number, room_type.id)
                .await
                .expect("Failed to create room");
            rooms.push(room);
        }
        let room_201 = rooms.pop().expect("room 201");
        let room_102 = rooms.pop().expect("room 102");
        let room_101 = rooms.pop().expect("room 101");

        let router = build_app(state.clone());

        Self {
            state,
            router,
            clock,
            admin,
            guest,
            other_guest,
            standard,
            suite,
            room_101,
            room_102,
            room_201,
            _db_dir: db_dir,
        }
    }

    pub fn admin_ctx(&self) -> RequestContext {
        RequestContext::for_user(&self.admin)
    }

    pub fn guest_ctx(&self) -> RequestContext {
        RequestContext::for_user(&self.guest)
    }

    pub fn other_ctx(&self) -> RequestContext {
        RequestContext::for_user(&self.other_guest)
    }

    /// Books `room` for the caller with the price computed from the room type.
    pub async fn book(
        &self,
        ctx: &RequestContext,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Booking, AppError> {
        self.state
            .booking_ledger
            .create_booking(
                ctx,
                CreateBookingRequest {
                    guest_id: None,
                    room_id: room.id,
                    check_in,
                    check_out,
                    total_price: None,
                    status: None,
                },
            )
            .await
    }

    /// Admin books `room` for the guest directly as Confirmed.
    pub async fn book_confirmed(
        &self,
        room: &Room,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Booking {
        self.state
            .booking_ledger
            .create_booking(
                &self.admin_ctx(),
                CreateBookingRequest {
                    guest_id: Some(self.guest.id),
                    room_id: room.id,
                    check_in,
                    check_out,
                    total_price: None,
                    status: Some(BookingStatus::Confirmed),
                },
            )
            .await
            .expect("Failed to create confirmed booking")
    }

    /// Guest books `room` as Pending at a fixed price.
    pub async fn book_priced(&self, room: &Room, check_in: NaiveDate, nights: i64, price: Money) -> Booking {
        self.state
            .booking_ledger
            .create_booking(
                &self.guest_ctx(),
                CreateBookingRequest {
                    guest_id: None,
                    room_id: room.id,
                    check_in,
                    check_out: check_in + chrono::Days::new(nights as u64),
                    total_price: Some(price),
                    status: None,
                },
            )
            .await
            .expect("Failed to create priced booking")
    }

    /// Current status of a room as stored.
    pub async fn room_status(&self, room_id: Uuid) -> RoomStatus {
        self.state
            .room_registry
            .get_room(room_id)
            .await
            .expect("room exists")
            .status
    }

    /// Current status of a booking as stored.
    pub async fn booking_status(&self, booking_id: Uuid) -> BookingStatus {
        self.state
            .booking_ledger
            .get_booking(&self.admin_ctx(), booking_id)
            .await
            .expect("booking exists")
            .booking
            .status
    }

    /// Make an HTTP request to the test app, optionally as `user`.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<Uuid>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.raw_request(method, path, body_str, user.map(|id| id.to_string()))
            .await
    }

    /// Make an HTTP request with a literal body and `X-User-Id` value.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: String,
        user_header: Option<String>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(user) = user_header {
            req = req.header("X-User-Id", user);
        }

        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

async fn create_user(state: &AppState, username: &str, role: UserRole) -> User {
    state
        .user_service
        .create_user(CreateUser {
            username: username.to_string(),
            email: Some(format!("{username}@example.com")),
            display_name: Some(username.to_string()),
            role,
        })
        .await
        .expect("Failed to create test user")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error envelope.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
