//! Booking handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use hotel_core::types::PageResponse;
use hotel_entity::booking::{Booking, BookingFilter};
use hotel_service::{BookingDetail, CreateBookingRequest};

use crate::dto::request::{BookingListQuery, CancelBody, CreateBookingBody, UpdateStatusBody};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, QueryParams, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateBookingBody>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), ApiError> {
    let req = CreateBookingRequest {
        guest_id: body.guest_id,
        room_id: body.room_id,
        check_in: body.check_in,
        check_out: body.check_out,
        total_price: body.total_price,
        status: body.status,
    };
    let booking = state.booking_ledger.create_booking(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking))))
}

/// GET /api/bookings
pub async fn list_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<BookingListQuery>,
    QueryParams(pagination): QueryParams<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Booking>>>, ApiError> {
    let filter = BookingFilter {
        guest_id: query.guest_id,
        room_id: query.room_id,
        status: query.status,
        from: query.from,
        to: query.to,
    };
    let page = state
        .booking_ledger
        .list_bookings(&auth, filter, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/bookings/{id}
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<BookingDetail>>, ApiError> {
    let id = parse_uuid(&id)?;
    let detail = state.booking_ledger.get_booking(&auth, id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateStatusBody>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let id = parse_uuid(&id)?;
    let booking = state
        .booking_ledger
        .transition_status(&auth, id, body.status)
        .await?;
    Ok(Json(ApiResponse::ok(booking)))
}

/// POST /api/bookings/{id}/cancel
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<CancelBody>,
) -> Result<Json<ApiResponse<Booking>>, ApiError> {
    let id = parse_uuid(&id)?;
    let booking = state
        .booking_ledger
        .cancel_booking(&auth, id, body.reason)
        .await?;
    Ok(Json(ApiResponse::ok(booking)))
}
