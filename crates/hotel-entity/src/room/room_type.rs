//! Room type entity and its detail projection.

use chrono::{DateTime, Utc};
use hotel_core::types::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::catalog::Amenity;

/// A category of rooms sharing price and capacity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomType {
    /// Unique room type identifier.
    pub id: Uuid,
    /// Display name, unique.
    pub name: String,
    /// Price per night.
    #[sqlx(rename = "price_cents")]
    pub price: Money,
    /// Maximum number of guests.
    pub capacity: i64,
    /// Free-form description.
    pub description: Option<String>,
    /// When the room type was created.
    pub created_at: DateTime<Utc>,
    /// When the room type was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A service offered with a room type, joined with the service catalog row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomTypeService {
    /// Service identifier.
    pub service_id: Uuid,
    /// Service name.
    pub name: String,
    /// List price of the service.
    #[sqlx(rename = "price_cents")]
    pub price: Money,
    /// Included in the room price.
    pub included: bool,
    /// Discount on the list price, 0 to 100.
    pub discount_percentage: i64,
}

/// A room type with its amenities and services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeDetail {
    /// The room type row.
    #[serde(flatten)]
    pub room_type: RoomType,
    /// Attached amenities.
    pub amenities: Vec<Amenity>,
    /// Attached services.
    pub services: Vec<RoomTypeService>,
}
