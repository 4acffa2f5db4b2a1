//! Room type handlers, including amenity and service associations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use hotel_entity::room::{RoomService, RoomType, RoomTypeDetail};
use hotel_service::RoomTypeInput;

use crate::dto::request::{AttachServiceBody, RoomTypeBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

fn input_from(body: RoomTypeBody) -> RoomTypeInput {
    RoomTypeInput {
        name: body.name,
        price: body.price,
        capacity: body.capacity,
        description: body.description,
    }
}

/// GET /api/room-types
pub async fn list_room_types(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<RoomType>>>, ApiError> {
    let types = state.room_type_service.list_room_types().await?;
    Ok(Json(ApiResponse::ok(types)))
}

/// POST /api/room-types
pub async fn create_room_type(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<RoomTypeBody>,
) -> Result<(StatusCode, Json<ApiResponse<RoomType>>), ApiError> {
    let room_type = state
        .room_type_service
        .create_room_type(&auth, input_from(body))
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(room_type))))
}

/// GET /api/room-types/{id}
pub async fn get_room_type(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RoomTypeDetail>>, ApiError> {
    let id = parse_uuid(&id)?;
    let detail = state.room_type_service.get_room_type(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// PUT /api/room-types/{id}
pub async fn update_room_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RoomTypeBody>,
) -> Result<Json<ApiResponse<RoomType>>, ApiError> {
    let id = parse_uuid(&id)?;
    let room_type = state
        .room_type_service
        .update_room_type(&auth, id, input_from(body))
        .await?;
    Ok(Json(ApiResponse::ok(room_type)))
}

/// DELETE /api/room-types/{id}
pub async fn delete_room_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    state.room_type_service.delete_room_type(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Room type deleted"))))
}

/// PUT /api/room-types/{id}/amenities/{amenity_id}
pub async fn attach_amenity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, amenity_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    let amenity_id = parse_uuid(&amenity_id)?;
    state
        .room_type_service
        .attach_amenity(&auth, id, amenity_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Amenity attached"))))
}

/// DELETE /api/room-types/{id}/amenities/{amenity_id}
pub async fn detach_amenity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, amenity_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    let amenity_id = parse_uuid(&amenity_id)?;
    state
        .room_type_service
        .detach_amenity(&auth, id, amenity_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Amenity detached"))))
}

/// PUT /api/room-types/{id}/services/{service_id}
pub async fn attach_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, service_id)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<AttachServiceBody>,
) -> Result<Json<ApiResponse<RoomService>>, ApiError> {
    let id = parse_uuid(&id)?;
    let service_id = parse_uuid(&service_id)?;
    let link = state
        .room_type_service
        .attach_service(&auth, id, service_id, body.included, body.discount_percentage)
        .await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// DELETE /api/room-types/{id}/services/{service_id}
pub async fn detach_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, service_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    let service_id = parse_uuid(&service_id)?;
    state
        .room_type_service
        .detach_service(&auth, id, service_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Service detached"))))
}
