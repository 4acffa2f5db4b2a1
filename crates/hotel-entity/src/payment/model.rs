//! Payment entity model.

use chrono::{DateTime, Utc};
use hotel_core::types::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::method::PaymentMethod;

/// A single, immutable payment against a booking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// The booking paid for.
    pub booking_id: Uuid,
    /// Amount paid, strictly positive.
    #[sqlx(rename = "amount_cents")]
    pub amount: Money,
    /// How it was paid.
    pub method: PaymentMethod,
    /// When the payment was recorded.
    pub payment_date: DateTime<Utc>,
}
