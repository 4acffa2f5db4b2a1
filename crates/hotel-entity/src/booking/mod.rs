//! Booking entities and lifecycle.

pub mod model;
pub mod status;

pub use model::{Booking, BookingFilter};
pub use status::BookingStatus;
