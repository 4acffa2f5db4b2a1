//! Booking ledger.

pub mod ledger;

pub use ledger::{BookingDetail, BookingLedger, CreateBookingRequest};
