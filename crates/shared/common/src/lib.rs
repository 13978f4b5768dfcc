//! Common utilities shared across services.
//!
//! This crate provides:
//! - Unified error handling with HTTP conversion
//! - The response envelope used by every endpoint
//! - Configuration structures

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use response::ApiResponse;
