//! Room type repository, including amenity and service associations.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_core::types::Money;
use hotel_entity::room::{Amenity, RoomService, RoomType, RoomTypeService};

use crate::error::map_db;

/// Fields of a room type supplied on create or update.
#[derive(Debug, Clone)]
pub struct RoomTypeFields<'a> {
    /// Unique name.
    pub name: &'a str,
    /// Price per night.
    pub price: Money,
    /// Maximum guests.
    pub capacity: i64,
    /// Description.
    pub description: Option<&'a str>,
}

/// Number of rows that reference a room type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomTypeReferences {
    /// Rooms of this type.
    pub rooms: i64,
    /// Attached amenities.
    pub amenities: i64,
    /// Attached services.
    pub services: i64,
}

impl RoomTypeReferences {
    /// Whether nothing references the room type.
    pub fn is_empty(&self) -> bool {
        self.rooms == 0 && self.amenities == 0 && self.services == 0
    }
}

/// Repository for room types.
#[derive(Debug, Clone)]
pub struct RoomTypeRepository {
    pool: SqlitePool,
}

impl RoomTypeRepository {
    /// Create a new room type repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a room type by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RoomType>> {
        self.find_by_id_in(&self.pool, id).await
    }

    /// Find a room type by primary key on the given executor.
    pub async fn find_by_id_in<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        id: Uuid,
    ) -> AppResult<Option<RoomType>> {
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await
            .map_err(map_db("Failed to find room type"))
    }

    /// List every room type, cheapest first.
    pub async fn find_all(&self) -> AppResult<Vec<RoomType>> {
        sqlx::query_as::<_, RoomType>("SELECT * FROM room_types ORDER BY price_cents, name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db("Failed to list room types"))
    }

    /// Insert a room type.
    pub async fn create(&self, fields: &RoomTypeFields<'_>, now: DateTime<Utc>) -> AppResult<RoomType> {
        sqlx::query_as::<_, RoomType>(
            "INSERT INTO room_types (id, name, price_cents, capacity, description, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(fields.name)
        .bind(fields.price)
        .bind(fields.capacity)
        .bind(fields.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db("Failed to create room type"))
    }

    /// Replace the fields of a room type.
    pub async fn update(
        &self,
        id: Uuid,
        fields: &RoomTypeFields<'_>,
        now: DateTime<Utc>,
    ) -> AppResult<Option<RoomType>> {
        sqlx::query_as::<_, RoomType>(
            "UPDATE room_types SET name = ?, price_cents = ?, capacity = ?, description = ?, \
             updated_at = ? WHERE id = ? RETURNING *",
        )
        .bind(fields.name)
        .bind(fields.price)
        .bind(fields.capacity)
        .bind(fields.description)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db("Failed to update room type"))
    }

    /// Delete a room type. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM room_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db("Failed to delete room type"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the rooms and association rows referencing a room type.
    pub async fn references(&self, id: Uuid) -> AppResult<RoomTypeReferences> {
        let (rooms, amenities, services): (i64, i64, i64) = sqlx::query_as(
            "SELECT \
                (SELECT COUNT(*) FROM rooms WHERE room_type_id = ?1), \
                (SELECT COUNT(*) FROM room_type_amenities WHERE room_type_id = ?1), \
                (SELECT COUNT(*) FROM room_services WHERE room_type_id = ?1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db("Failed to count room type references"))?;

        Ok(RoomTypeReferences {
            rooms,
            amenities,
            services,
        })
    }

    /// Amenities attached to a room type.
    pub async fn amenities(&self, id: Uuid) -> AppResult<Vec<Amenity>> {
        sqlx::query_as::<_, Amenity>(
            "SELECT a.* FROM amenities a \
             JOIN room_type_amenities rta ON rta.amenity_id = a.id \
             WHERE rta.room_type_id = ? ORDER BY a.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db("Failed to list room type amenities"))
    }

    /// Services attached to a room type, joined with the catalog.
    pub async fn services(&self, id: Uuid) -> AppResult<Vec<RoomTypeService>> {
        sqlx::query_as::<_, RoomTypeService>(
            "SELECT s.id AS service_id, s.name, s.price_cents, rs.included, rs.discount_percentage \
             FROM services s \
             JOIN room_services rs ON rs.service_id = s.id \
             WHERE rs.room_type_id = ? ORDER BY s.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db("Failed to list room type services"))
    }

    /// Attach an amenity. Attaching twice is a no-op.
    pub async fn attach_amenity(&self, room_type_id: Uuid, amenity_id: Uuid) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO room_type_amenities (room_type_id, amenity_id) VALUES (?, ?) \
             ON CONFLICT (room_type_id, amenity_id) DO NOTHING",
        )
        .bind(room_type_id)
        .bind(amenity_id)
        .execute(&self.pool)
        .await
        .map_err(map_db("Failed to attach amenity"))?;
        Ok(())
    }

    /// Detach an amenity. Returns `true` if it was attached.
    pub async fn detach_amenity(&self, room_type_id: Uuid, amenity_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM room_type_amenities WHERE room_type_id = ? AND amenity_id = ?",
        )
        .bind(room_type_id)
        .bind(amenity_id)
        .execute(&self.pool)
        .await
        .map_err(map_db("Failed to detach amenity"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach a service, or update the terms of an attached one.
    pub async fn upsert_service(&self, link: &RoomService) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO room_services (room_type_id, service_id, included, discount_percentage) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT (room_type_id, service_id) DO UPDATE SET \
                included = excluded.included, \
                discount_percentage = excluded.discount_percentage",
        )
        .bind(link.room_type_id)
        .bind(link.service_id)
        .bind(link.included)
        .bind(link.discount_percentage)
        .execute(&self.pool)
        .await
        .map_err(map_db("Failed to attach service"))?;
        Ok(())
    }

    /// Detach a service. Returns `true` if it was attached.
    pub async fn detach_service(&self, room_type_id: Uuid, service_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM room_services WHERE room_type_id = ? AND service_id = ?")
                .bind(room_type_id)
                .bind(service_id)
                .execute(&self.pool)
                .await
                .map_err(map_db("Failed to detach service"))?;
        Ok(result.rows_affected() > 0)
    }
}
