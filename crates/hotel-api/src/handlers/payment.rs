//! Payment handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use hotel_service::{PaymentHistory, PaymentReceipt};

use crate::dto::request::RecordPaymentBody;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /api/bookings/{id}/payments
pub async fn record_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RecordPaymentBody>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentReceipt>>), ApiError> {
    let booking_id = parse_uuid(&id)?;
    let receipt = state
        .payment_ledger
        .record_payment(&auth, booking_id, body.amount, body.method)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(receipt))))
}

/// GET /api/bookings/{id}/payments
pub async fn list_payments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PaymentHistory>>, ApiError> {
    let booking_id = parse_uuid(&id)?;
    let history = state
        .payment_ledger
        .get_payments_for_booking(&auth, booking_id)
        .await?;
    Ok(Json(ApiResponse::ok(history)))
}
