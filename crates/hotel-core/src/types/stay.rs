//! Half-open date interval for a stay.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A stay from `check_in` (inclusive) to `check_out` (exclusive).
///
/// Construction guarantees `check_in < check_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl StayRange {
    /// Create a stay, rejecting empty or inverted ranges.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, AppError> {
        if check_out <= check_in {
            return Err(AppError::validation(format!(
                "Check-out ({check_out}) must be after check-in ({check_in})"
            )));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// First night of the stay.
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Departure day; not itself a night of the stay.
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Standard half-open overlap. Touching boundaries do not overlap.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }

    /// Whether `day` is one of the nights of the stay.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }
}
