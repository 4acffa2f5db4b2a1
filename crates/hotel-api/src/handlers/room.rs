//! Room handlers: CRUD, availability and status override.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use hotel_core::types::PageResponse;
use hotel_entity::room::{AvailableRoom, Room};
use hotel_service::AvailabilityReport;

use crate::dto::request::{AvailabilityQuery, RoomBody, RoomListQuery, RoomStatusBody, SearchQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, QueryParams, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /api/rooms
pub async fn list_rooms(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<RoomListQuery>,
    QueryParams(pagination): QueryParams<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<Room>>>, ApiError> {
    let page = state
        .room_registry
        .list_rooms(query.status, query.room_type_id, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/rooms/available
pub async fn search_available(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<AvailableRoom>>>, ApiError> {
    let rooms = state
        .availability
        .search_available(query.check_in, query.check_out, query.min_capacity)
        .await?;
    Ok(Json(ApiResponse::ok(rooms)))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<RoomBody>,
) -> Result<(StatusCode, Json<ApiResponse<Room>>), ApiError> {
    let room = state
        .room_registry
        .create_room(&auth, &body.room_number, body.room_type_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(room))))
}

/// GET /api/rooms/{id}
pub async fn get_room(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let id = parse_uuid(&id)?;
    let room = state.room_registry.get_room(id).await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// PUT /api/rooms/{id}
pub async fn update_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RoomBody>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let id = parse_uuid(&id)?;
    let room = state
        .room_registry
        .update_room(&auth, id, &body.room_number, body.room_type_id)
        .await?;
    Ok(Json(ApiResponse::ok(room)))
}

/// DELETE /api/rooms/{id}
pub async fn delete_room(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    state.room_registry.delete_room(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Room deleted"))))
}

/// GET /api/rooms/{id}/availability
pub async fn check_availability(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    QueryParams(query): QueryParams<AvailabilityQuery>,
) -> Result<Json<ApiResponse<AvailabilityReport>>, ApiError> {
    let id = parse_uuid(&id)?;
    let report = state
        .availability
        .is_available(id, query.check_in, query.check_out)
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// PATCH /api/rooms/{id}/status
pub async fn set_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RoomStatusBody>,
) -> Result<Json<ApiResponse<Room>>, ApiError> {
    let id = parse_uuid(&id)?;
    let room = state
        .room_registry
        .set_room_status(&auth, id, body.status, body.force, body.reason)
        .await?;
    Ok(Json(ApiResponse::ok(room)))
}
