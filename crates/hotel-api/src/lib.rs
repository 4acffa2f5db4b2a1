//! # hotel-api
//!
//! HTTP API layer for the hotel reservation service built on Axum.
//!
//! Provides all REST endpoints under `/api`, middleware (request logging,
//! CORS, compression, tracing), extractors, DTOs, and error mapping.
//! Callers are identified by the `X-User-Id` header set by the gateway.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
