//! `AuthUser` extractor: identifies the caller from the `X-User-Id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's user ID, asserted by the upstream gateway.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extracted caller context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing X-User-Id header"))?;

        let user_id = Uuid::parse_str(raw.trim())
            .map_err(|_| AppError::authentication("Invalid X-User-Id header"))?;

        let user = state.user_service.resolve_caller(user_id).await?;

        Ok(AuthUser(RequestContext::for_user(&user)))
    }
}
