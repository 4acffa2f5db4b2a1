//! HTTP request handlers, one module per resource.

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod health;
pub mod payment;
pub mod room;
pub mod room_type;
