//! Route table. Everything lives under `/api`.

use axum::Router;
use axum::routing::{get, patch, post, put};

use crate::handlers;
use crate::state::AppState;

/// Builds the API router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // ── Health ───────────────────────────────────────────
        .route("/health", get(handlers::health::health))
        // ── Bookings ─────────────────────────────────────────
        .route(
            "/bookings",
            post(handlers::booking::create_booking).get(handlers::booking::list_bookings),
        )
        .route("/bookings/{id}", get(handlers::booking::get_booking))
        .route(
            "/bookings/{id}/status",
            patch(handlers::booking::update_status),
        )
        .route(
            "/bookings/{id}/cancel",
            post(handlers::booking::cancel_booking),
        )
        .route(
            "/bookings/{id}/payments",
            post(handlers::payment::record_payment).get(handlers::payment::list_payments),
        )
        // ── Rooms ────────────────────────────────────────────
        .route(
            "/rooms",
            get(handlers::room::list_rooms).post(handlers::room::create_room),
        )
        .route("/rooms/available", get(handlers::room::search_available))
        .route(
            "/rooms/{id}",
            get(handlers::room::get_room)
                .put(handlers::room::update_room)
                .delete(handlers::room::delete_room),
        )
        .route(
            "/rooms/{id}/availability",
            get(handlers::room::check_availability),
        )
        .route("/rooms/{id}/status", patch(handlers::room::set_status))
        // ── Room types ───────────────────────────────────────
        .route(
            "/room-types",
            get(handlers::room_type::list_room_types).post(handlers::room_type::create_room_type),
        )
        .route(
            "/room-types/{id}",
            get(handlers::room_type::get_room_type)
                .put(handlers::room_type::update_room_type)
                .delete(handlers::room_type::delete_room_type),
        )
        .route(
            "/room-types/{id}/amenities/{amenity_id}",
            put(handlers::room_type::attach_amenity).delete(handlers::room_type::detach_amenity),
        )
        .route(
            "/room-types/{id}/services/{service_id}",
            put(handlers::room_type::attach_service).delete(handlers::room_type::detach_service),
        )
        // ── Catalog ──────────────────────────────────────────
        .route(
            "/amenities",
            get(handlers::catalog::list_amenities).post(handlers::catalog::create_amenity),
        )
        .route(
            "/amenities/{id}",
            axum::routing::delete(handlers::catalog::delete_amenity),
        )
        .route(
            "/services",
            get(handlers::catalog::list_services).post(handlers::catalog::create_service),
        )
        .route(
            "/services/{id}",
            axum::routing::delete(handlers::catalog::delete_service),
        )
        // ── Admin ────────────────────────────────────────────
        .route("/admin/actions", get(handlers::admin::list_actions));

    Router::new().nest("/api", api).with_state(state)
}
