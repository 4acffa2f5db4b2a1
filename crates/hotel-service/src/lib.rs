//! # hotel-service
//!
//! Business logic service layer for the hotel reservation service. Each
//! service orchestrates repositories and collaborators (guest directory,
//! admin action sink, clock) to implement application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. The booking ledger owns the
//! only function that moves a booking between states, and with it the
//! only code path that changes a room's status on a booking's behalf.

pub mod admin;
pub mod availability;
pub mod booking;
pub mod context;
pub mod payment;
pub mod room;
pub mod user;

mod retry;

pub use admin::{AdminActionService, DbActionLog};
pub use availability::{AvailabilityChecker, AvailabilityReport};
pub use booking::{BookingDetail, BookingLedger, CreateBookingRequest};
pub use context::RequestContext;
pub use payment::{PaymentHistory, PaymentLedger, PaymentReceipt};
pub use room::{CatalogService, RoomRegistry, RoomTypeInput, RoomTypeService};
pub use user::{UserDirectory, UserService};
