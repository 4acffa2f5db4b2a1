//! Room entity model.

use chrono::{DateTime, Utc};
use hotel_core::types::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::RoomStatus;

/// A physical, bookable room.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Unique room identifier.
    pub id: Uuid,
    /// Door number, unique across the hotel.
    pub room_number: String,
    /// The room's type (price, capacity).
    pub room_type_id: Uuid,
    /// Operational status.
    pub status: RoomStatus,
    /// When the room was created.
    pub created_at: DateTime<Utc>,
    /// When the room was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A bookable room joined with its type, as returned by availability search.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AvailableRoom {
    /// Room identifier.
    pub id: Uuid,
    /// Door number.
    pub room_number: String,
    /// Room type identifier.
    pub room_type_id: Uuid,
    /// Room type name.
    pub room_type_name: String,
    /// Price per night.
    #[sqlx(rename = "price_cents")]
    pub price: Money,
    /// Maximum number of guests.
    pub capacity: i64,
}
