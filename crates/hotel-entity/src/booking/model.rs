//! Booking entity model.

use chrono::{DateTime, NaiveDate, Utc};
use hotel_core::types::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// A reservation of one room for a half-open range of nights.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The guest the room is booked for.
    pub guest_id: Uuid,
    /// The booked room.
    pub room_id: Uuid,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day (exclusive).
    pub check_out: NaiveDate,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Price fixed at creation.
    #[sqlx(rename = "total_price_cents")]
    pub total_price: Money,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Check if the given user owns this booking.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.guest_id == user_id
    }

    /// Whether the guest is in house on `day` (the stay covers that night).
    pub fn is_in_house_on(&self, day: NaiveDate) -> bool {
        self.status == BookingStatus::Confirmed && self.check_in <= day && day < self.check_out
    }
}

/// Filters for listing bookings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingFilter {
    /// Only bookings of this guest.
    pub guest_id: Option<Uuid>,
    /// Only bookings of this room.
    pub room_id: Option<Uuid>,
    /// Only bookings in this status.
    pub status: Option<BookingStatus>,
    /// Only bookings overlapping `[from, to)`.
    pub from: Option<NaiveDate>,
    /// See `from`.
    pub to: Option<NaiveDate>,
}
