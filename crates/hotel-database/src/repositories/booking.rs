//! Booking repository implementation.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_core::types::{PageRequest, PageResponse};
use hotel_entity::booking::{Booking, BookingFilter, BookingStatus};

use crate::error::map_db;

/// Repository for bookings.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        self.find_by_id_in(&self.pool, id).await
    }

    /// Find a booking by primary key on the given executor.
    pub async fn find_by_id_in<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        id: Uuid,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(exec)
            .await
            .map_err(map_db("Failed to find booking"))
    }

    /// Active bookings of a room overlapping `[check_in, check_out)`.
    ///
    /// Touching boundaries (`existing.check_out == check_in` and vice versa)
    /// are not conflicts.
    pub async fn find_conflicts<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE room_id = ? AND status IN (?, ?) AND check_in < ? AND check_out > ? \
             ORDER BY check_in",
        )
        .bind(room_id)
        .bind(BookingStatus::Pending)
        .bind(BookingStatus::Confirmed)
        .bind(check_out)
        .bind(check_in)
        .fetch_all(exec)
        .await
        .map_err(map_db("Failed to check booking conflicts"))
    }

    /// Confirmed bookings of a room whose stay covers `day`.
    pub async fn find_in_house<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        room_id: Uuid,
        day: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings \
             WHERE room_id = ? AND status = ? AND check_in <= ? AND check_out > ?",
        )
        .bind(room_id)
        .bind(BookingStatus::Confirmed)
        .bind(day)
        .bind(day)
        .fetch_all(exec)
        .await
        .map_err(map_db("Failed to find in-house bookings"))
    }

    /// List bookings matching a filter, most recent stays first.
    pub async fn find_filtered(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Booking>> {
        let mut conditions = Vec::new();
        if filter.guest_id.is_some() {
            conditions.push("guest_id = ?");
        }
        if filter.room_id.is_some() {
            conditions.push("room_id = ?");
        }
        if filter.status.is_some() {
            conditions.push("status = ?");
        }
        if filter.to.is_some() {
            conditions.push("check_in < ?");
        }
        if filter.from.is_some() {
            conditions.push("check_out > ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_sql = format!("SELECT COUNT(*) FROM bookings {where_clause}");
        let select_sql = format!(
            "SELECT * FROM bookings {where_clause} \
             ORDER BY check_in DESC, created_at DESC LIMIT ? OFFSET ?"
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        let mut select_query = sqlx::query_as::<_, Booking>(&select_sql);

        if let Some(g) = filter.guest_id {
            count_query = count_query.bind(g);
            select_query = select_query.bind(g);
        }
        if let Some(r) = filter.room_id {
            count_query = count_query.bind(r);
            select_query = select_query.bind(r);
        }
        if let Some(s) = filter.status {
            count_query = count_query.bind(s);
            select_query = select_query.bind(s);
        }
        if let Some(to) = filter.to {
            count_query = count_query.bind(to);
            select_query = select_query.bind(to);
        }
        if let Some(from) = filter.from {
            count_query = count_query.bind(from);
            select_query = select_query.bind(from);
        }

        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(map_db("Failed to count bookings"))?;

        let bookings = select_query
            .bind(page.limit() as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db("Failed to list bookings"))?;

        Ok(PageResponse::new(
            bookings,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert a booking.
    pub async fn insert<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        booking: &Booking,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO bookings \
             (id, guest_id, room_id, check_in, check_out, status, total_price_cents, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(booking.id)
        .bind(booking.guest_id)
        .bind(booking.room_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.status)
        .bind(booking.total_price)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(exec)
        .await
        .map_err(map_db("Failed to create booking"))?;
        Ok(())
    }

    /// Touch the booking row so the enclosing transaction holds the write lock.
    ///
    /// Returns `false` when the booking does not exist.
    pub async fn lock<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query("UPDATE bookings SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(exec)
            .await
            .map_err(map_db("Failed to lock booking"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Compare-and-set the status of a booking.
    ///
    /// Returns `false` when the stored status is no longer `expected`.
    pub async fn update_status<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        id: Uuid,
        expected: BookingStatus,
        status: BookingStatus,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE bookings SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
        )
        .bind(status)
        .bind(now)
        .bind(id)
        .bind(expected)
        .execute(exec)
        .await
        .map_err(map_db("Failed to update booking status"))?;
        Ok(result.rows_affected() > 0)
    }
}
