//! Booking ledger: creation, lifecycle transitions and reads.
//!
//! Every status change, whichever entry point triggers it, goes through
//! [`BookingLedger::apply_transition`], which updates the booking and the
//! room inside the caller's transaction.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqliteConnection;
use tracing::{debug, info};
use uuid::Uuid;

use hotel_core::config::BookingConfig;
use hotel_core::error::AppError;
use hotel_core::traits::{ActionLogSink, AdminActionRecord, Clock, GuestDirectory};
use hotel_core::types::{Money, PageRequest, PageResponse, StayRange};
use hotel_database::repositories::{
    BookingRepository, PaymentRepository, RoomRepository, RoomTypeRepository,
};
use hotel_database::{DatabasePool, db_error};
use hotel_entity::booking::{Booking, BookingFilter, BookingStatus};
use hotel_entity::payment::PaymentSummary;
use hotel_entity::room::RoomStatus;

use crate::admin::record_admin_action;
use crate::context::RequestContext;
use crate::retry::with_integrity_retry;

/// Request to create a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// Guest the room is booked for. Defaults to the caller.
    pub guest_id: Option<Uuid>,
    /// Room to book.
    pub room_id: Uuid,
    /// First night.
    pub check_in: NaiveDate,
    /// Departure day.
    pub check_out: NaiveDate,
    /// Agreed price. Defaults to nights × the room type's nightly price.
    pub total_price: Option<Money>,
    /// Initial status: `pending` (default) or, for admins, `confirmed`.
    pub status: Option<BookingStatus>,
}

/// A booking with its payment totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetail {
    /// The booking.
    #[serde(flatten)]
    pub booking: Booking,
    /// Paid and outstanding amounts.
    pub payment_summary: PaymentSummary,
}

/// Creates bookings and moves them through their lifecycle.
#[derive(Debug, Clone)]
pub struct BookingLedger {
    db: Arc<DatabasePool>,
    booking_repo: Arc<BookingRepository>,
    room_repo: Arc<RoomRepository>,
    room_type_repo: Arc<RoomTypeRepository>,
    payment_repo: Arc<PaymentRepository>,
    directory: Arc<dyn GuestDirectory>,
    action_log: Arc<dyn ActionLogSink>,
    clock: Arc<dyn Clock>,
    config: BookingConfig,
}

impl BookingLedger {
    /// Creates a new booking ledger.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: Arc<DatabasePool>,
        booking_repo: Arc<BookingRepository>,
        room_repo: Arc<RoomRepository>,
        room_type_repo: Arc<RoomTypeRepository>,
        payment_repo: Arc<PaymentRepository>,
        directory: Arc<dyn GuestDirectory>,
        action_log: Arc<dyn ActionLogSink>,
        clock: Arc<dyn Clock>,
        config: BookingConfig,
    ) -> Self {
        Self {
            db,
            booking_repo,
            room_repo,
            room_type_repo,
            payment_repo,
            directory,
            action_log,
            clock,
            config,
        }
    }

    /// Creates a booking.
    ///
    /// The room row is written first so the transaction owns the write lock
    /// before it reads the room's bookings; two racing requests for the same
    /// dates therefore serialize and the loser sees the winner's booking.
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        req: CreateBookingRequest,
    ) -> Result<Booking, AppError> {
        let stay = StayRange::new(req.check_in, req.check_out)?;
        let today = self.clock.today();
        if stay.check_in() < today {
            return Err(AppError::validation(format!(
                "Check-in ({}) cannot be in the past",
                stay.check_in()
            )));
        }
        if let Some(price) = req.total_price {
            if !price.is_positive() {
                return Err(AppError::validation("Total price must be positive"));
            }
        }

        let initial = req.status.unwrap_or(BookingStatus::Pending);
        match initial {
            BookingStatus::Pending => {}
            BookingStatus::Confirmed if ctx.is_admin() => {}
            BookingStatus::Confirmed => {
                return Err(AppError::authorization(
                    "Only an admin can create a confirmed booking",
                ));
            }
            other => {
                return Err(AppError::validation(format!(
                    "A booking cannot be created as {other}"
                )));
            }
        }

        let guest_id = req.guest_id.unwrap_or(ctx.user_id);
        if !ctx.can_act_for(guest_id) {
            return Err(AppError::authorization(
                "Guests can only create bookings for themselves",
            ));
        }
        if !self.directory.guest_exists(guest_id).await? {
            return Err(AppError::not_found(format!("Guest {guest_id} not found")));
        }

        let room_id = req.room_id;
        let total_price = req.total_price;
        let booking = with_integrity_retry(&self.config, "create_booking", move || {
            self.try_create(guest_id, room_id, stay, total_price, initial)
        })
        .await?;

        info!(
            booking_id = %booking.id,
            guest_id = %booking.guest_id,
            room_id = %booking.room_id,
            check_in = %booking.check_in,
            check_out = %booking.check_out,
            status = %booking.status,
            total_price = %booking.total_price,
            actor = %ctx.user_id,
            "Booking created"
        );

        Ok(booking)
    }

    async fn try_create(
        &self,
        guest_id: Uuid,
        room_id: Uuid,
        stay: StayRange,
        total_price: Option<Money>,
        initial: BookingStatus,
    ) -> Result<Booking, AppError> {
        let now = self.clock.now();
        let mut tx = self.db.begin().await?;

        if !self.room_repo.lock(&mut *tx, room_id, now).await? {
            return Err(AppError::not_found(format!("Room {room_id} not found")));
        }
        let room = self
            .room_repo
            .find_by_id_in(&mut *tx, room_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;

        if !room.status.is_bookable() {
            return Err(AppError::conflict(format!(
                "Room {} is not available for booking (status: {})",
                room.room_number, room.status
            )));
        }

        let conflicts = self
            .booking_repo
            .find_conflicts(&mut *tx, room_id, stay.check_in(), stay.check_out())
            .await?;
        if !conflicts.is_empty() {
            let details = json!({
                "conflicts": conflicts
                    .iter()
                    .map(|b| json!({
                        "id": b.id,
                        "check_in": b.check_in,
                        "check_out": b.check_out,
                        "status": b.status,
                    }))
                    .collect::<Vec<_>>()
            });
            return Err(AppError::conflict(format!(
                "Room {} is already booked between {} and {}",
                room.room_number,
                stay.check_in(),
                stay.check_out()
            ))
            .with_details(details));
        }

        let total_price = match total_price {
            Some(price) => price,
            None => {
                let room_type = self
                    .room_type_repo
                    .find_by_id_in(&mut *tx, room.room_type_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::internal(format!(
                            "Room type {} of room {} is missing",
                            room.room_type_id, room.room_number
                        ))
                    })?;
                room_type.price.times(stay.nights())?
            }
        };

        let booking = Booking {
            id: Uuid::new_v4(),
            guest_id,
            room_id,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            status: BookingStatus::Pending,
            total_price,
            created_at: now,
            updated_at: now,
        };
        self.booking_repo.insert(&mut *tx, &booking).await?;

        let booking = if initial == BookingStatus::Confirmed {
            self.apply_transition(&mut tx, &booking, BookingStatus::Confirmed)
                .await?
        } else {
            booking
        };

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit booking", e))?;
        Ok(booking)
    }

    /// Moves a booking to `target`.
    ///
    /// Cancellation is open to the booking's guest and admins; every other
    /// target requires an admin.
    pub async fn transition_status(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        target: BookingStatus,
    ) -> Result<Booking, AppError> {
        self.change_status(ctx, booking_id, target, None).await
    }

    /// Cancels a booking, recording the reason when an admin cancels.
    pub async fn cancel_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        reason: Option<String>,
    ) -> Result<Booking, AppError> {
        self.change_status(ctx, booking_id, BookingStatus::Cancelled, reason)
            .await
    }

    async fn change_status(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        target: BookingStatus,
        reason: Option<String>,
    ) -> Result<Booking, AppError> {
        let booking = self.find_booking(booking_id).await?;

        if target == BookingStatus::Cancelled {
            if !ctx.can_act_for(booking.guest_id) {
                return Err(AppError::authorization(
                    "Only the booking's guest or an admin can cancel it",
                ));
            }
        } else if !ctx.is_admin() {
            return Err(AppError::authorization(format!(
                "Only an admin can change a booking to {target}"
            )));
        }

        let (previous, updated) =
            with_integrity_retry(&self.config, "transition_booking", move || {
                self.try_transition(booking_id, target)
            })
            .await?;

        info!(
            booking_id = %booking_id,
            from = %previous,
            to = %updated.status,
            actor = %ctx.user_id,
            "Booking status changed"
        );

        if ctx.is_admin() {
            let action_type = if target == BookingStatus::Cancelled {
                "booking.cancel"
            } else {
                "booking.status"
            };
            record_admin_action(
                self.action_log.as_ref(),
                AdminActionRecord {
                    admin_id: ctx.user_id,
                    action_type: action_type.to_string(),
                    target_type: "booking".to_string(),
                    target_id: booking_id,
                    detail: json!({
                        "from": previous,
                        "to": updated.status,
                        "reason": reason,
                    }),
                },
            )
            .await;
        }

        Ok(updated)
    }

    async fn try_transition(
        &self,
        booking_id: Uuid,
        target: BookingStatus,
    ) -> Result<(BookingStatus, Booking), AppError> {
        let mut tx = self.db.begin().await?;

        if !self
            .booking_repo
            .lock(&mut *tx, booking_id, self.clock.now())
            .await?
        {
            return Err(AppError::not_found(format!("Booking {booking_id} not found")));
        }
        let booking = self
            .booking_repo
            .find_by_id_in(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))?;

        let updated = self.apply_transition(&mut tx, &booking, target).await?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit status change", e))?;
        Ok((booking.status, updated))
    }

    /// Moves `booking` to `target` and applies the room side effect, on the
    /// caller's connection.
    ///
    /// The booking row is updated only if its status is still the one in
    /// `booking`; losing that race is reported as `Integrity`.
    pub(crate) async fn apply_transition(
        &self,
        conn: &mut SqliteConnection,
        booking: &Booking,
        target: BookingStatus,
    ) -> Result<Booking, AppError> {
        let target = booking.status.transition(target)?;
        let now = self.clock.now();

        let swapped = self
            .booking_repo
            .update_status(&mut *conn, booking.id, booking.status, target, now)
            .await?;
        if !swapped {
            return Err(AppError::integrity(format!(
                "Booking {} was modified concurrently",
                booking.id
            )));
        }

        let today = self.clock.today();
        if let Some(room_status) = target.room_effect(booking.check_in, today) {
            // Releasing a booking never frees a room another confirmed guest occupies today.
            let held = room_status == RoomStatus::Available
                && !self
                    .booking_repo
                    .find_in_house(&mut *conn, booking.room_id, today)
                    .await?
                    .is_empty();
            if held {
                debug!(
                    booking_id = %booking.id,
                    room_id = %booking.room_id,
                    "Room kept occupied by another in-house booking"
                );
            } else {
                self.room_repo
                    .set_status(&mut *conn, booking.room_id, room_status, now)
                    .await?;
            }
        }

        Ok(Booking {
            status: target,
            updated_at: now,
            ..booking.clone()
        })
    }

    /// Gets a booking with its payment summary (owner or admin).
    pub async fn get_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<BookingDetail, AppError> {
        let booking = self.find_booking(booking_id).await?;
        if !ctx.can_act_for(booking.guest_id) {
            return Err(AppError::authorization(
                "You do not have access to this booking",
            ));
        }

        let total_paid = self
            .payment_repo
            .total_paid(self.db.pool(), booking_id)
            .await?;
        Ok(BookingDetail {
            payment_summary: PaymentSummary::new(booking.total_price, total_paid),
            booking,
        })
    }

    /// Lists bookings. Guests only ever see their own.
    pub async fn list_bookings(
        &self,
        ctx: &RequestContext,
        mut filter: BookingFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Booking>, AppError> {
        if !ctx.is_admin() {
            filter.guest_id = Some(ctx.user_id);
        }
        if let (Some(from), Some(to)) = (filter.from, filter.to) {
            StayRange::new(from, to)?;
        }
        self.booking_repo.find_filtered(&filter, &page).await
    }

    async fn find_booking(&self, booking_id: Uuid) -> Result<Booking, AppError> {
        self.booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))
    }
}
