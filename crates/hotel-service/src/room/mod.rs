//! Room registry, room types and the amenity/service catalog.

pub mod catalog;
pub mod registry;
pub mod room_type;

pub use catalog::CatalogService;
pub use registry::RoomRegistry;
pub use room_type::{RoomTypeInput, RoomTypeService};
