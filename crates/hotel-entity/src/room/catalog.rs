//! Amenity and service catalog entities.

use chrono::{DateTime, Utc};
use hotel_core::AppError;
use hotel_core::types::Money;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A feature of a room type (Wi-Fi, balcony, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Amenity {
    /// Unique amenity identifier.
    pub id: Uuid,
    /// Name, unique.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// When the amenity was created.
    pub created_at: DateTime<Utc>,
}

/// A purchasable extra (breakfast, parking, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    /// Unique service identifier.
    pub id: Uuid,
    /// Name, unique.
    pub name: String,
    /// List price.
    #[sqlx(rename = "price_cents")]
    pub price: Money,
    /// Free-form description.
    pub description: Option<String>,
    /// When the service was created.
    pub created_at: DateTime<Utc>,
}

/// Join row between a room type and a service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoomService {
    /// Room type.
    pub room_type_id: Uuid,
    /// Service.
    pub service_id: Uuid,
    /// Included in the room price.
    pub included: bool,
    /// Discount on the list price, 0 to 100.
    pub discount_percentage: i64,
}

impl RoomService {
    /// Build a join row, forcing the discount to zero for included services.
    pub fn normalized(
        room_type_id: Uuid,
        service_id: Uuid,
        included: bool,
        discount_percentage: i64,
    ) -> Result<Self, AppError> {
        if !(0..=100).contains(&discount_percentage) {
            return Err(AppError::validation(format!(
                "Discount percentage must be between 0 and 100, got {discount_percentage}"
            )));
        }
        Ok(Self {
            room_type_id,
            service_id,
            included,
            discount_percentage: if included { 0 } else { discount_percentage },
        })
    }
}
