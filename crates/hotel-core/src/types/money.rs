//! Fixed-point money amounts.
//!
//! Amounts are decimals with at most two fractional digits. They travel as
//! JSON strings/numbers and are persisted as integer minor units (cents)
//! when the `sqlx` feature is enabled.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Maximum number of fractional digits a money amount may carry.
const MAX_SCALE: u32 = 2;

/// Largest magnitude whose minor units fit in an `i64`.
const MAX_AMOUNT: Decimal = Decimal::from_parts(u32::MAX, u32::MAX >> 1, 0, false, MAX_SCALE);

/// A currency-agnostic money amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Build an amount from integer minor units.
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MAX_SCALE))
    }

    /// Build an amount from a whole number of major units.
    pub fn from_major(units: i64) -> Self {
        Self::from_cents(units.saturating_mul(100))
    }

    /// Validate and wrap a decimal.
    pub fn from_decimal(value: Decimal) -> Result<Self, AppError> {
        if value.normalize().scale() > MAX_SCALE {
            return Err(AppError::validation(format!(
                "Amount {value} has more than {MAX_SCALE} decimal places"
            )));
        }
        if value.abs() > MAX_AMOUNT {
            return Err(AppError::validation(format!(
                "Amount {value} exceeds the maximum of {MAX_AMOUNT}"
            )));
        }
        Ok(Self(value))
    }

    /// The amount as a decimal.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount in integer minor units, or `None` when it does not fit.
    pub fn cents(&self) -> Option<i64> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|c| c.round().to_i64())
    }

    /// Strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Multiply by a count (nights, quantity), staying within the storable range.
    pub fn times(&self, count: i64) -> Result<Self, AppError> {
        let product = self
            .0
            .checked_mul(Decimal::from(count))
            .ok_or_else(|| AppError::validation(format!("Amount {self} x {count} overflows")))?;
        Self::from_decimal(product)
    }

    /// Subtract, clamping at zero.
    pub fn saturating_sub(self, other: Money) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl TryFrom<Decimal> for Money {
    type Error = AppError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(feature = "sqlx")]
impl sqlx::Type<sqlx::Sqlite> for Money {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlx")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Money {
    fn encode_by_ref(
        &self,
        buf: &mut <sqlx::Sqlite as sqlx::Database>::ArgumentBuffer<'q>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        let cents = self
            .cents()
            .ok_or_else(|| format!("Amount {self} does not fit in integer cents"))?;
        <i64 as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&cents, buf)
    }
}

#[cfg(feature = "sqlx")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Money {
    fn decode(
        value: <sqlx::Sqlite as sqlx::Database>::ValueRef<'r>,
    ) -> Result<Self, sqlx::error::BoxDynError> {
        <i64 as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value).map(Money::from_cents)
    }
}
