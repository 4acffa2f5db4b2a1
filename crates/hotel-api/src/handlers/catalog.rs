//! Amenity and service catalog handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use hotel_entity::room::{Amenity, Service};

use crate::dto::request::{AmenityBody, ServiceBody};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// GET /api/amenities
pub async fn list_amenities(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Amenity>>>, ApiError> {
    let amenities = state.catalog_service.list_amenities().await?;
    Ok(Json(ApiResponse::ok(amenities)))
}

/// POST /api/amenities
pub async fn create_amenity(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<AmenityBody>,
) -> Result<(StatusCode, Json<ApiResponse<Amenity>>), ApiError> {
    let amenity = state
        .catalog_service
        .create_amenity(&auth, &body.name, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(amenity))))
}

/// DELETE /api/amenities/{id}
pub async fn delete_amenity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    state.catalog_service.delete_amenity(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Amenity deleted"))))
}

/// GET /api/services
pub async fn list_services(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Service>>>, ApiError> {
    let services = state.catalog_service.list_services().await?;
    Ok(Json(ApiResponse::ok(services)))
}

/// POST /api/services
pub async fn create_service(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<ServiceBody>,
) -> Result<(StatusCode, Json<ApiResponse<Service>>), ApiError> {
    let service = state
        .catalog_service
        .create_service(&auth, &body.name, body.price, body.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(service))))
}

/// DELETE /api/services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_uuid(&id)?;
    state.catalog_service.delete_service(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Service deleted"))))
}
