//! # hotel-entity
//!
//! Domain entity models for the hotel reservation service. Every struct in
//! this crate represents a database table row or a domain value object.
//! All entities derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and
//! database entities additionally derive `sqlx::FromRow`.
//!
//! Lifecycle rules that are pure functions of the data (the booking
//! transition table and its room side effect) live here too, so every
//! entry point shares one definition.

pub mod admin;
pub mod booking;
pub mod payment;
pub mod room;
pub mod user;
