//! Admin action log entity.

pub mod model;

pub use model::{AdminAction, AdminActionFilter};
