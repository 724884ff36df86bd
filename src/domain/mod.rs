//! Domain layer for the taskdeck task list.
//!
//! This module contains core business logic and domain models.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{ApiError, ApiResult, TaskError};
