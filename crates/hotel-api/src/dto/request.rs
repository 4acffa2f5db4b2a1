//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use hotel_core::types::Money;
use hotel_entity::booking::BookingStatus;
use hotel_entity::payment::PaymentMethod;
use hotel_entity::room::RoomStatus;

// ── Bookings ─────────────────────────────────────────────────────

/// Create booking request. `guest_id` defaults to the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingBody {
    /// Guest the booking is for.
    pub guest_id: Option<Uuid>,
    /// Room to book.
    pub room_id: Uuid,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
    /// Agreed total; computed from the room type when omitted.
    pub total_price: Option<Money>,
    /// Initial status (Pending unless an admin asks for Confirmed).
    pub status: Option<BookingStatus>,
}

/// Booking status transition request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStatusBody {
    /// Target status.
    pub status: BookingStatus,
}

/// Cancellation request.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CancelBody {
    /// Free-text reason, recorded for admin cancellations.
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Booking list filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    pub guest_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// ── Payments ─────────────────────────────────────────────────────

/// Record payment request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordPaymentBody {
    /// Amount paid; at most two decimal places.
    pub amount: Money,
    /// Payment method.
    pub method: PaymentMethod,
}

// ── Rooms ────────────────────────────────────────────────────────

/// Create or update room request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoomBody {
    /// Room number, unique across the hotel.
    #[validate(length(min = 1, max = 16))]
    pub room_number: String,
    /// Room type.
    pub room_type_id: Uuid,
}

/// Admin room status override.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoomStatusBody {
    pub status: RoomStatus,
    /// Override even when the room would disagree with its in-house booking.
    #[serde(default)]
    pub force: bool,
    #[validate(length(max = 500))]
    pub reason: Option<String>,
}

/// Room list filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomListQuery {
    pub status: Option<RoomStatus>,
    pub room_type_id: Option<Uuid>,
}

/// Date range for a single-room availability check.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Availability search across all rooms.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Minimum guests the room type must hold (default: 1).
    pub min_capacity: Option<i64>,
}

// ── Room types & catalog ─────────────────────────────────────────

/// Create or update room type request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoomTypeBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Nightly price.
    pub price: Money,
    #[validate(range(min = 1))]
    pub capacity: i64,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Attach or update a service on a room type.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AttachServiceBody {
    /// Included in the room price (forces the discount to zero).
    #[serde(default)]
    pub included: bool,
    /// Discount in percent.
    #[serde(default)]
    #[validate(range(min = 0, max = 100))]
    pub discount_percentage: i64,
}

/// Create amenity request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AmenityBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Create service request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServiceBody {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub price: Money,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

// ── Admin ────────────────────────────────────────────────────────

/// Admin action log filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminActionQuery {
    pub admin_id: Option<Uuid>,
    pub action_type: Option<String>,
    pub target_id: Option<Uuid>,
}
