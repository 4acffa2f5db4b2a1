//! Repository implementations for all hotel entities.

pub mod admin_action;
pub mod booking;
pub mod catalog;
pub mod payment;
pub mod room;
pub mod room_type;
pub mod user;

pub use admin_action::AdminActionRepository;
pub use booking::BookingRepository;
pub use catalog::{AmenityRepository, ServiceRepository};
pub use payment::PaymentRepository;
pub use room::RoomRepository;
pub use room_type::RoomTypeRepository;
pub use user::UserRepository;
