//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use hotel_core::config::AppConfig;
use hotel_core::traits::{ActionLogSink, Clock, GuestDirectory};
use hotel_database::DatabasePool;
use hotel_database::repositories::{
    AdminActionRepository, AmenityRepository, BookingRepository, PaymentRepository,
    RoomRepository, RoomTypeRepository, ServiceRepository, UserRepository,
};
use hotel_service::{
    AdminActionService, AvailabilityChecker, BookingLedger, CatalogService, DbActionLog,
    PaymentLedger, RoomRegistry, RoomTypeService, UserDirectory, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// SQLite connection pool
    pub db: Arc<DatabasePool>,

    // ── Services ─────────────────────────────────────────────
    /// Guest directory and caller resolution
    pub user_service: Arc<UserService>,
    /// Date availability
    pub availability: Arc<AvailabilityChecker>,
    /// Booking lifecycle
    pub booking_ledger: Arc<BookingLedger>,
    /// Payments
    pub payment_ledger: Arc<PaymentLedger>,
    /// Rooms
    pub room_registry: Arc<RoomRegistry>,
    /// Room types and their associations
    pub room_type_service: Arc<RoomTypeService>,
    /// Amenity and service catalog
    pub catalog_service: Arc<CatalogService>,
    /// Admin action log reader
    pub admin_action_service: Arc<AdminActionService>,
}

impl AppState {
    /// Wire repositories and services over a connected pool, logging admin
    /// actions to the database.
    pub fn new(config: AppConfig, db: DatabasePool, clock: Arc<dyn Clock>) -> Self {
        let action_repo = Arc::new(AdminActionRepository::new(db.pool().clone()));
        let action_log: Arc<dyn ActionLogSink> =
            Arc::new(DbActionLog::new(action_repo, Arc::clone(&clock)));
        Self::with_action_log(config, db, clock, action_log)
    }

    /// Like [`AppState::new`] with an explicit admin action sink.
    pub fn with_action_log(
        config: AppConfig,
        db: DatabasePool,
        clock: Arc<dyn Clock>,
        action_log: Arc<dyn ActionLogSink>,
    ) -> Self {
        let pool = db.pool().clone();
        let db = Arc::new(db);

        // ── Repositories ─────────────────────────────────────
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let room_repo = Arc::new(RoomRepository::new(pool.clone()));
        let room_type_repo = Arc::new(RoomTypeRepository::new(pool.clone()));
        let amenity_repo = Arc::new(AmenityRepository::new(pool.clone()));
        let service_repo = Arc::new(ServiceRepository::new(pool.clone()));
        let booking_repo = Arc::new(BookingRepository::new(pool.clone()));
        let payment_repo = Arc::new(PaymentRepository::new(pool.clone()));
        let action_repo = Arc::new(AdminActionRepository::new(pool));

        // ── Services ─────────────────────────────────────────
        let directory: Arc<dyn GuestDirectory> =
            Arc::new(UserDirectory::new(Arc::clone(&user_repo)));
        let user_service = Arc::new(UserService::new(Arc::clone(&user_repo), Arc::clone(&clock)));
        let availability = Arc::new(AvailabilityChecker::new(
            Arc::clone(&db),
            Arc::clone(&room_repo),
            Arc::clone(&booking_repo),
        ));
        let booking_ledger = Arc::new(BookingLedger::new(
            Arc::clone(&db),
            Arc::clone(&booking_repo),
            Arc::clone(&room_repo),
            Arc::clone(&room_type_repo),
            Arc::clone(&payment_repo),
            directory,
            Arc::clone(&action_log),
            Arc::clone(&clock),
            config.booking.clone(),
        ));
        let payment_ledger = Arc::new(PaymentLedger::new(
            Arc::clone(&db),
            Arc::clone(&booking_repo),
            Arc::clone(&payment_repo),
            Arc::clone(&booking_ledger),
            Arc::clone(&clock),
            config.booking.clone(),
        ));
        let room_registry = Arc::new(RoomRegistry::new(
            Arc::clone(&db),
            Arc::clone(&room_repo),
            Arc::clone(&room_type_repo),
            Arc::clone(&booking_repo),
            action_log,
            Arc::clone(&clock),
        ));
        let room_type_service = Arc::new(RoomTypeService::new(
            Arc::clone(&room_type_repo),
            Arc::clone(&amenity_repo),
            Arc::clone(&service_repo),
            Arc::clone(&clock),
        ));
        let catalog_service = Arc::new(CatalogService::new(amenity_repo, service_repo, clock));
        let admin_action_service = Arc::new(AdminActionService::new(action_repo));

        Self {
            config: Arc::new(config),
            db,
            user_service,
            availability,
            booking_ledger,
            payment_ledger,
            room_registry,
            room_type_service,
            catalog_service,
            admin_action_service,
        }
    }
}
