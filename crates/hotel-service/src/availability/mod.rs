//! Date availability of rooms.

pub mod checker;

pub use checker::{AvailabilityChecker, AvailabilityReport};
