//! Booking status enumeration and transition table.

use chrono::NaiveDate;
use hotel_core::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::room::RoomStatus;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created, awaiting payment or confirmation.
    Pending,
    /// Confirmed by payment or by staff.
    Confirmed,
    /// Cancelled by the guest or staff.
    Cancelled,
    /// The stay is over.
    Completed,
    /// The guest never arrived.
    NoShow,
}

impl BookingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [BookingStatus; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Cancelled,
        Self::Completed,
        Self::NoShow,
    ];

    /// Check if the booking is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed | Self::NoShow)
    }

    /// Active bookings hold their room's dates.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Whether payments may still be taken against a booking in this state.
    pub fn accepts_payments(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }

    /// Check the transition table.
    pub fn can_transition_to(&self, target: BookingStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Pending, Self::NoShow)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
                | (Self::Confirmed, Self::NoShow)
        )
    }

    /// Validate a transition, returning the target on success.
    pub fn transition(&self, target: BookingStatus) -> Result<BookingStatus, AppError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(AppError::state(format!(
                "Cannot change booking status from {self} to {target}"
            )))
        }
    }

    /// The room status implied by entering `self`, if any.
    ///
    /// Confirmation only occupies the room when the stay starts today.
    pub fn room_effect(&self, check_in: NaiveDate, today: NaiveDate) -> Option<RoomStatus> {
        match self {
            Self::Confirmed if check_in == today => Some(RoomStatus::Occupied),
            Self::Confirmed | Self::Pending => None,
            Self::Cancelled | Self::NoShow => Some(RoomStatus::Available),
            Self::Completed => Some(RoomStatus::Cleaning),
        }
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            "no_show" | "noshow" => Ok(Self::NoShow),
            _ => Err(AppError::validation(format!(
                "Invalid booking status: '{s}'"
            ))),
        }
    }
}
