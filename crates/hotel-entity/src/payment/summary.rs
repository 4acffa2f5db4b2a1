//! Derived payment totals.

use hotel_core::types::Money;
use serde::{Deserialize, Serialize};

use super::model::Payment;

/// Paid/balance totals of a booking. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// Price of the booking.
    pub total_price: Money,
    /// Sum of all payments.
    pub total_paid: Money,
    /// Remaining amount, never negative.
    pub balance: Money,
    /// Whether the balance is settled.
    pub fully_paid: bool,
}

impl PaymentSummary {
    /// Compute the summary for a price and the amount paid so far.
    pub fn new(total_price: Money, total_paid: Money) -> Self {
        Self {
            total_price,
            total_paid,
            balance: total_price.saturating_sub(total_paid),
            fully_paid: total_paid >= total_price,
        }
    }
}

/// A payment with the balance remaining right after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    /// The payment.
    #[serde(flatten)]
    pub payment: Payment,
    /// Balance after this payment was applied.
    pub balance_after: Money,
}

impl PaymentEntry {
    /// Attach running balances to payments ordered oldest first.
    pub fn running(total_price: Money, payments: Vec<Payment>) -> Vec<Self> {
        let mut paid = Money::ZERO;
        payments
            .into_iter()
            .map(|payment| {
                paid = paid + payment.amount;
                Self {
                    payment,
                    balance_after: total_price.saturating_sub(paid),
                }
            })
            .collect()
    }
}
