//! # hotel-core
//!
//! Core crate for the hotel reservation service. Contains configuration
//! schemas, shared value types (money, date ranges, pagination), the
//! collaborator traits consumed by the ledgers, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
