//! Collaborator traits defined in `hotel-core` and implemented by other crates.

pub mod action_log;
pub mod clock;
pub mod directory;

pub use action_log::{ActionLogSink, AdminActionRecord};
pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::GuestDirectory;
