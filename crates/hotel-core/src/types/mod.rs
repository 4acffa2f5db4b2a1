//! Core type definitions used across the workspace.

pub mod money;
pub mod pagination;
pub mod stay;

pub use money::Money;
pub use pagination::{PageRequest, PageResponse};
pub use stay::StayRange;
