//! Amenity and service catalog repositories.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_core::types::Money;
use hotel_entity::room::{Amenity, Service};

use crate::error::map_db;

/// Repository for amenities.
#[derive(Debug, Clone)]
pub struct AmenityRepository {
    pool: SqlitePool,
}

impl AmenityRepository {
    /// Create a new amenity repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find an amenity by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Amenity>> {
        sqlx::query_as::<_, Amenity>("SELECT * FROM amenities WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db("Failed to find amenity"))
    }

    /// List all amenities by name.
    pub async fn find_all(&self) -> AppResult<Vec<Amenity>> {
        sqlx::query_as::<_, Amenity>("SELECT * FROM amenities ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db("Failed to list amenities"))
    }

    /// Insert an amenity.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Amenity> {
        sqlx::query_as::<_, Amenity>(
            "INSERT INTO amenities (id, name, description, created_at) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db("Failed to create amenity"))
    }

    /// Number of room types the amenity is attached to.
    pub async fn count_links(&self, id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM room_type_amenities WHERE amenity_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db("Failed to count amenity links"))
    }

    /// Delete an amenity. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM amenities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db("Failed to delete amenity"))?;
        Ok(result.rows_affected() > 0)
    }
}

/// Repository for purchasable services.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Create a new service repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a service by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Service>> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db("Failed to find service"))
    }

    /// List all services by name.
    pub async fn find_all(&self) -> AppResult<Vec<Service>> {
        sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db("Failed to list services"))
    }

    /// Insert a service.
    pub async fn create(
        &self,
        name: &str,
        price: Money,
        description: Option<&str>,
        now: DateTime<Utc>,
    ) -> AppResult<Service> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, name, price_cents, description, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(price)
        .bind(description)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db("Failed to create service"))
    }

    /// Number of room types the service is attached to.
    pub async fn count_links(&self, id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM room_services WHERE service_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db("Failed to count service links"))
    }

    /// Delete a service. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db("Failed to delete service"))?;
        Ok(result.rows_affected() > 0)
    }
}
