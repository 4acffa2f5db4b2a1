//! Payment repository implementation.
//!
//! Payments are append-only; the schema rejects updates and deletes.

use sqlx::{SqliteExecutor, SqlitePool};
use uuid::Uuid;

use hotel_core::result::AppResult;
use hotel_core::types::Money;
use hotel_entity::payment::Payment;

use crate::error::map_db;

/// Repository for payments.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: SqlitePool,
}

impl PaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sum of all payments recorded against a booking.
    pub async fn total_paid<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        booking_id: Uuid,
    ) -> AppResult<Money> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM payments WHERE booking_id = ?",
        )
        .bind(booking_id)
        .fetch_one(exec)
        .await
        .map(Money::from_cents)
        .map_err(map_db("Failed to sum payments"))
    }

    /// Payments of a booking, oldest first.
    pub async fn find_by_booking(&self, booking_id: Uuid) -> AppResult<Vec<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_id = ? ORDER BY payment_date ASC, rowid ASC",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db("Failed to list payments"))
    }

    /// Append a payment.
    pub async fn insert<'e, E: SqliteExecutor<'e>>(
        &self,
        exec: E,
        payment: &Payment,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO payments (id, booking_id, amount_cents, method, payment_date) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(payment.id)
        .bind(payment.booking_id)
        .bind(payment.amount)
        .bind(payment.method)
        .bind(payment.payment_date)
        .execute(exec)
        .await
        .map_err(map_db("Failed to record payment"))?;
        Ok(())
    }
}
