//! User (guest directory) entities.

pub mod model;
pub mod role;

pub use model::{CreateUser, User};
pub use role::UserRole;
