//! Shared API response types
//!
//! Every endpoint answers with the same JSON envelope:
//! `{success: true, data, message}` on success, and
//! `{success: false, message, errors}` on failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Success envelope wrapping a payload
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    /// HTTP 200 with the default success message
    pub fn ok(data: T) -> Response {
        Self::with_status(StatusCode::OK, data, "Success")
    }

    /// Arbitrary success status with a custom message
    pub fn with_status(status: StatusCode, data: T, message: impl Into<String>) -> Response {
        let body = Self {
            success: true,
            data: Some(data),
            message: message.into(),
        };
        (status, Json(body)).into_response()
    }
}

/// Failure envelope body
#[derive(Debug, Serialize)]
struct ApiErrorBody {
    success: bool,
    message: String,
    errors: Vec<String>,
}

/// API error carrying a status code, a caller-facing message and an
/// optional list of offending fields
///
/// Internal errors are logged with full detail at construction; the
/// response body only carries the endpoint's generic message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    errors: Vec<String>,
}

impl ApiError {
    /// HTTP 400 naming the field that failed validation
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            errors: vec![field.into()],
        }
    }

    /// HTTP 404
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// HTTP 500; the underlying error is logged, never sent to the caller
    pub fn internal(message: impl Into<String>, err: anyhow::Error) -> Self {
        let message = message.into();
        tracing::error!(error = format!("{:#}", err), "{}", message);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            errors: Vec::new(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            success: false,
            message: self.message,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field() {
        let err = ApiError::validation("email", "Invalid email format");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.errors, vec!["email"]);
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = ApiError::internal(
            "Failed to fetch projects",
            anyhow::anyhow!("connection reset by peer"),
        );
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to fetch projects");
        assert!(err.errors.is_empty());
    }
}
