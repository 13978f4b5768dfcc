//! Response envelope shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{Paginated, PaginationData};
use serde::Serialize;

/// Standard API response wrapper: `{status, message, data, metadata?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PaginationData>,
    /// Machine-readable error code, only set on failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_status(StatusCode::OK, Some(data))
    }

    pub fn created(data: T) -> Self {
        Self::with_status(StatusCode::CREATED, Some(data))
    }

    pub fn paginated(page: Paginated<T>) -> ApiResponse<Vec<T>> {
        ApiResponse {
            metadata: Some(page.meta),
            ..ApiResponse::with_status(StatusCode::OK, Some(page.data))
        }
    }

    fn with_status(status: StatusCode, data: Option<T>) -> Self {
        Self {
            status: status.as_u16(),
            message: "success".to_string(),
            data,
            metadata: None,
            code: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success without a body, e.g. after a delete
    pub fn empty() -> Self {
        Self::with_status(StatusCode::OK, None)
    }

    pub fn error(status: StatusCode, code: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: None,
            metadata: None,
            code: Some(code.to_string()),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
