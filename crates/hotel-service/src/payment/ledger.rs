//! Payment ledger: append-only payments and derived balances.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use hotel_core::config::BookingConfig;
use hotel_core::error::AppError;
use hotel_core::traits::Clock;
use hotel_core::types::Money;
use hotel_database::repositories::{BookingRepository, PaymentRepository};
use hotel_database::{DatabasePool, db_error};
use hotel_entity::booking::{Booking, BookingStatus};
use hotel_entity::payment::{Payment, PaymentEntry, PaymentMethod, PaymentSummary};

use crate::booking::BookingLedger;
use crate::context::RequestContext;
use crate::retry::with_integrity_retry;

/// Outcome of recording a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// The stored payment.
    pub payment: Payment,
    /// Booking status after the payment (may have become `confirmed`).
    pub booking_status: BookingStatus,
    /// Totals after the payment.
    pub payment_summary: PaymentSummary,
}

/// Payments of a booking with running balances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentHistory {
    /// Payments, oldest first.
    pub payments: Vec<PaymentEntry>,
    /// Current totals.
    pub payment_summary: PaymentSummary,
}

/// Records payments and confirms bookings once they are paid in full.
#[derive(Debug, Clone)]
pub struct PaymentLedger {
    db: Arc<DatabasePool>,
    booking_repo: Arc<BookingRepository>,
    payment_repo: Arc<PaymentRepository>,
    bookings: Arc<BookingLedger>,
    clock: Arc<dyn Clock>,
    config: BookingConfig,
}

impl PaymentLedger {
    /// Creates a new payment ledger.
    pub fn new(
        db: Arc<DatabasePool>,
        booking_repo: Arc<BookingRepository>,
        payment_repo: Arc<PaymentRepository>,
        bookings: Arc<BookingLedger>,
        clock: Arc<dyn Clock>,
        config: BookingConfig,
    ) -> Self {
        Self {
            db,
            booking_repo,
            payment_repo,
            bookings,
            clock,
            config,
        }
    }

    /// Records a payment against a booking.
    ///
    /// The booking row is locked before the paid total is read, so
    /// concurrent payments cannot jointly exceed the price. A payment that
    /// settles a pending booking confirms it in the same transaction.
    pub async fn record_payment(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, AppError> {
        if !amount.is_positive() {
            return Err(AppError::validation("Payment amount must be positive"));
        }

        let booking = self.find_booking(booking_id).await?;
        if !ctx.can_act_for(booking.guest_id) {
            return Err(AppError::authorization(
                "Only the booking's guest or an admin can pay for it",
            ));
        }

        let receipt = with_integrity_retry(&self.config, "record_payment", move || {
            self.try_record(booking_id, amount, method)
        })
        .await?;

        info!(
            payment_id = %receipt.payment.id,
            booking_id = %booking_id,
            amount = %amount,
            method = %method,
            total_paid = %receipt.payment_summary.total_paid,
            booking_status = %receipt.booking_status,
            actor = %ctx.user_id,
            "Payment recorded"
        );

        Ok(receipt)
    }

    async fn try_record(
        &self,
        booking_id: Uuid,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<PaymentReceipt, AppError> {
        let now = self.clock.now();
        let mut tx = self.db.begin().await?;

        if !self.booking_repo.lock(&mut *tx, booking_id, now).await? {
            return Err(AppError::not_found(format!("Booking {booking_id} not found")));
        }
        let booking = self
            .booking_repo
            .find_by_id_in(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))?;

        if !booking.status.accepts_payments() {
            return Err(AppError::state(format!(
                "Cannot record a payment for a {} booking",
                booking.status
            )));
        }

        let paid = self.payment_repo.total_paid(&mut *tx, booking_id).await?;
        let remaining = booking.total_price.saturating_sub(paid);
        if amount > remaining {
            return Err(AppError::conflict(format!(
                "Payment of {amount} exceeds remaining balance of {remaining}"
            ))
            .with_details(json!({
                "total_price": booking.total_price,
                "total_paid": paid,
                "remaining_balance": remaining,
            })));
        }

        let payment = Payment {
            id: Uuid::new_v4(),
            booking_id,
            amount,
            method,
            payment_date: now,
        };
        self.payment_repo.insert(&mut *tx, &payment).await?;

        let total_paid = paid + amount;
        let booking = if total_paid >= booking.total_price
            && booking.status == BookingStatus::Pending
        {
            self.bookings
                .apply_transition(&mut tx, &booking, BookingStatus::Confirmed)
                .await?
        } else {
            booking
        };

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit payment", e))?;

        Ok(PaymentReceipt {
            payment,
            booking_status: booking.status,
            payment_summary: PaymentSummary::new(booking.total_price, total_paid),
        })
    }

    /// Payments of a booking with the balance after each one.
    pub async fn get_payments_for_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<PaymentHistory, AppError> {
        let booking = self.find_booking(booking_id).await?;
        if !ctx.can_act_for(booking.guest_id) {
            return Err(AppError::authorization(
                "You do not have access to this booking",
            ));
        }

        let payments = self.payment_repo.find_by_booking(booking_id).await?;
        let total_paid: Money = payments.iter().map(|p| p.amount).sum();
        Ok(PaymentHistory {
            payment_summary: PaymentSummary::new(booking.total_price, total_paid),
            payments: PaymentEntry::running(booking.total_price, payments),
        })
    }

    async fn find_booking(&self, booking_id: Uuid) -> Result<Booking, AppError> {
        self.booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))
    }
}
