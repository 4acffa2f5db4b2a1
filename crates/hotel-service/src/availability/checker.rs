//! Availability checker.
//!
//! Read-only. A room's operational status and its date availability are
//! independent: this module answers only the latter, except for the
//! search which also requires the room to be `Available`.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use hotel_core::error::AppError;
use hotel_core::types::StayRange;
use hotel_database::DatabasePool;
use hotel_database::repositories::{BookingRepository, RoomRepository};
use hotel_entity::booking::Booking;
use hotel_entity::room::AvailableRoom;

/// Result of an availability check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityReport {
    /// Whether no active booking overlaps the range.
    pub available: bool,
    /// The overlapping bookings.
    pub conflicts: Vec<Booking>,
}

/// Answers whether rooms are free over a date range.
#[derive(Debug, Clone)]
pub struct AvailabilityChecker {
    db: Arc<DatabasePool>,
    room_repo: Arc<RoomRepository>,
    booking_repo: Arc<BookingRepository>,
}

impl AvailabilityChecker {
    /// Creates a new availability checker.
    pub fn new(
        db: Arc<DatabasePool>,
        room_repo: Arc<RoomRepository>,
        booking_repo: Arc<BookingRepository>,
    ) -> Self {
        Self {
            db,
            room_repo,
            booking_repo,
        }
    }

    /// Check a single room over `[check_in, check_out)`.
    pub async fn is_available(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityReport, AppError> {
        let stay = StayRange::new(check_in, check_out)?;

        if self.room_repo.find_by_id(room_id).await?.is_none() {
            return Err(AppError::not_found(format!("Room {room_id} not found")));
        }

        let conflicts = self
            .booking_repo
            .find_conflicts(self.db.pool(), room_id, stay.check_in(), stay.check_out())
            .await?;

        debug!(
            room_id = %room_id,
            check_in = %check_in,
            check_out = %check_out,
            conflicts = conflicts.len(),
            "Checked room availability"
        );

        Ok(AvailabilityReport {
            available: conflicts.is_empty(),
            conflicts,
        })
    }

    /// Rooms that can be booked over `[check_in, check_out)` for at least
    /// `min_capacity` guests, cheapest first.
    pub async fn search_available(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
        min_capacity: Option<i64>,
    ) -> Result<Vec<AvailableRoom>, AppError> {
        let stay = StayRange::new(check_in, check_out)?;
        let min_capacity = min_capacity.unwrap_or(1);
        if min_capacity < 1 {
            return Err(AppError::validation("Capacity must be at least 1"));
        }

        self.room_repo
            .search_available(stay.check_in(), stay.check_out(), min_capacity)
            .await
    }
}
