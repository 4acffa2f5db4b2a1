//! Room, room type and catalog entities.

pub mod catalog;
pub mod model;
pub mod room_type;
pub mod status;

pub use catalog::{Amenity, RoomService, Service};
pub use model::{AvailableRoom, Room};
pub use room_type::{RoomType, RoomTypeDetail, RoomTypeService};
pub use status::RoomStatus;
