//! # hotel-database
//!
//! SQLite connection management, schema migrations and concrete repository
//! implementations for all hotel entities.
//!
//! Repositories hold a pool for standalone reads. Operations that take part
//! in a ledger transaction accept any [`sqlx::SqliteExecutor`], so callers
//! can pass either the pool or `&mut *tx`.

pub mod connection;
pub mod error;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use error::db_error;
