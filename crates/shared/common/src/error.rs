//! Unified error handling.
//!
//! Provides a single error type for every layer of a service, with
//! conversion to the HTTP response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use thiserror::Error;

use crate::response::ApiResponse;

/// Server error code reported by MongoDB for unique index violations
#[cfg(feature = "database")]
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Entity named by conflicts coming out of the store driver
#[cfg(feature = "database")]
const STORE_CONFLICT_ENTITY: &str = "Document";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    InvalidArgument(String),

    // Store errors
    #[error("Store error: {0}")]
    Store(String),

    #[error("Store operation timed out")]
    Timeout,

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Timeout => "TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidArgument(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::InvalidArgument(msg) => msg.clone(),
            AppError::Conflict(_) => self.to_string(),

            // Hide details for internal errors
            AppError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                "A store error occurred".to_string()
            }
            AppError::Timeout => {
                tracing::error!("Store operation timed out");
                "The operation timed out".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::error(self.status(), self.code(), self.user_message()).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidArgument(msg) => AppError::InvalidArgument(msg),
        }
    }
}

// =============================================================================
// Store Error Conversion (MongoDB)
// =============================================================================

#[cfg(feature = "database")]
impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                AppError::conflict(STORE_CONFLICT_ENTITY)
            }
            ErrorKind::InsertMany(insert_error)
                if insert_error
                    .write_errors
                    .as_ref()
                    .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE)) =>
            {
                AppError::conflict(STORE_CONFLICT_ENTITY)
            }
            ErrorKind::Io(io_error) if io_error.kind() == std::io::ErrorKind::TimedOut => {
                AppError::Timeout
            }
            // No server answered within the driver's selection window
            ErrorKind::ServerSelection { .. } => AppError::Timeout,
            _ => AppError::Store(err.to_string()),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        AppError::InvalidArgument(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        AppError::Store(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("Breed").status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::invalid_argument("bad").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::store("io").status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Timeout.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_conflict_message_names_entity() {
        assert_eq!(AppError::conflict("Breed").user_message(), "Breed already exists");
        assert_eq!(AppError::conflict("Breed").to_string(), "Breed already exists");
    }

    #[test]
    fn test_store_message_is_hidden() {
        let message = AppError::store("connection reset by 10.0.0.4").user_message();
        assert!(!message.contains("10.0.0.4"));
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: AppError = DomainError::invalid_argument("limit").into();
        assert!(matches!(err, AppError::InvalidArgument(ref msg) if msg == "limit"));
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<u8> = None;
        assert!(matches!(missing.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(3).ok_or_not_found().unwrap(), 3);
    }
}
