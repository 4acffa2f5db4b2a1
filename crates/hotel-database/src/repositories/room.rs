//! Room repository implementation.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_core::types::{PageRequest, PageResponse};
use hotel_entity::room::{AvailableRoom, Room, RoomStatus};

use crate::error::map_db;

/// Repository for rooms.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a room by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        self.find_by_id_in(&self.pool, id).await
    }

    /// Find a room by primary key on the given executor.
    pub async fn find_by_id_in<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        id: Uuid,
    ) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await
            .map_err(map_db("Failed to find room"))
    }

    /// Find a room by its door number.
    pub async fn find_by_number(&self, room_number: &str) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE room_number = ?")
            .bind(room_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db("Failed to find room by number"))
    }

    /// List rooms, optionally filtered by status and room type.
    pub async fn find_all(
        &self,
        status: Option<RoomStatus>,
        room_type_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Room>> {
        let mut conditions = Vec::new();
        if status.is_some() {
            conditions.push("status = ?");
        }
        if room_type_id.is_some() {
            conditions.push("room_type_id = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM rooms {where_clause}");
        let select_sql =
            format!("SELECT * FROM rooms {where_clause} ORDER BY room_number ASC LIMIT ? OFFSET ?");

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Room>(&select_sql);

        if let Some(s) = status {
            count_query = count_query.bind(s);
            select_query = select_query.bind(s);
        }
        if let Some(rt) = room_type_id {
            count_query = count_query.bind(rt);
            select_query = select_query.bind(rt);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(map_db("Failed to count rooms"))?;

        let rooms = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db("Failed to list rooms"))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a new room in the `Available` state.
    pub async fn create(
        &self,
        room_number: &str,
        room_type_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (id, room_number, room_type_id, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(room_number)
        .bind(room_type_id)
        .bind(RoomStatus::Available)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db("Failed to create room"))
    }

    /// Update a room's number and type.
    pub async fn update(
        &self,
        id: Uuid,
        room_number: &str,
        room_type_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET room_number = ?, room_type_id = ?, updated_at = ? \
             WHERE id = ? RETURNING *",
        )
        .bind(room_number)
        .bind(room_type_id)
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db("Failed to update room"))
    }

    /// Delete a room. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db("Failed to delete room"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the bookings, of any status, that reference a room.
    pub async fn count_bookings(&self, id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE room_id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db("Failed to count room bookings"))
    }

    /// Touch the room row so the enclosing transaction holds the write lock.
    ///
    /// Returns `false` when the room does not exist.
    pub async fn lock<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE rooms SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(exec)
            .await
            .map_err(map_db("Failed to lock room"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the operational status of a room.
    pub async fn set_status<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        id: Uuid,
        status: RoomStatus,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE rooms SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(now)
            .bind(id)
            .execute(exec)
            .await
            .map_err(map_db("Failed to update room status"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Rooms that are `Available`, large enough, and free over `[check_in, check_out)`.
    ///
    /// Cheapest first, then by room number.
    pub async fn search_available(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        min_capacity: i64,
    ) -> AppResult<Vec<AvailableRoom>> {
        sqlx::query_as::<_, AvailableRoom>(
            "SELECT r.id, r.room_number, r.room_type_id, t.name AS room_type_name, \
                    t.price_cents, t.capacity \
             FROM rooms r \
             JOIN room_types t ON t.id = r.room_type_id \
             WHERE r.status = ? \
               AND t.capacity >= ? \
               AND NOT EXISTS ( \
                   SELECT 1 FROM bookings b \
                   WHERE b.room_id = r.id \
                     AND b.status IN ('pending', 'confirmed') \
                     AND b.check_in < ? AND b.check_out > ?) \
             ORDER BY t.price_cents ASC, r.room_number ASC",
        )
        .bind(RoomStatus::Available)
        .bind(min_capacity)
        .bind(check_out)
        .bind(check_in)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db("Failed to search available rooms"))
    }
}
