//! Admin action log handler.

use axum::Json;
use axum::extract::State;

use hotel_core::types::PageResponse;
use hotel_entity::admin::{AdminAction, AdminActionFilter};

use crate::dto::request::AdminActionQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, QueryParams};
use crate::state::AppState;

/// GET /api/admin/actions
pub async fn list_actions(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<AdminActionQuery>,
    QueryParams(pagination): QueryParams<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<AdminAction>>>, ApiError> {
    let filter = AdminActionFilter {
        admin_id: query.admin_id,
        action_type: query.action_type,
        target_id: query.target_id,
    };
    let page = state
        .admin_action_service
        .list_actions(&auth, filter, pagination.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}
