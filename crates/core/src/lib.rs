//! Core business logic for mealbridge.

pub mod services;

pub use services::*;
