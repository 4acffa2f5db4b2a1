//! Guest directory services.

pub mod directory;
pub mod service;

pub use directory::UserDirectory;
pub use service::UserService;
