//! HTTP API layer for mealbridge.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: donations, orphanages, notifications, profiles
//! - **Extractors**: authenticated profile
//! - **Middleware**: subject resolution, application state
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
