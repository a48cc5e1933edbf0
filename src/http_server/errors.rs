//! # HTTP API Errors
//!
//! The only place store and validation failures become status codes.
//! Clients get a short message; underlying I/O detail stays in the
//! server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::product::{FieldError, ValidationErrors};
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path id is not a positive integer
    #[error("Invalid product id: {0}")]
    InvalidId(String),

    /// Body is not parseable JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Body failed field constraints
    #[error("Invalid product data")]
    Validation(ValidationErrors),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure; carries the store's short message only
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Translate a failed store envelope
    pub fn from_store(error: StoreError, message: String) -> Self {
        if error.is_not_found() {
            ApiError::NotFound(message)
        } else {
            ApiError::Internal(message)
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::InvalidBody(_) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-oriented category
    pub fn label(&self) -> &'static str {
        match self {
            ApiError::InvalidId(_) => "Invalid id",
            ApiError::InvalidBody(_) => "Invalid body",
            ApiError::Validation(_) => "Validation failed",
            ApiError::NotFound(_) => "Not found",
            ApiError::Internal(_) => "Internal error",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        let error = err.label().to_string();
        let message = err.to_string();
        let details = match err {
            ApiError::Validation(errors) => Some(errors.into_fields()),
            _ => None,
        };
        Self {
            error,
            message,
            code,
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let event = if status.is_server_error() {
            Event::RequestFailed
        } else {
            Event::RequestRejected
        };
        log_event_with_fields(
            event,
            &[("reason", &self.to_string()), ("status", status.as_str())],
        );

        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::InvalidId("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Validation(ValidationErrors::single("name", "Required")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("gone".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_store_maps_not_found() {
        let err = ApiError::from_store(
            StoreError::NotFound(4),
            "Product with ID 4 not found".to_string(),
        );
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Product with ID 4 not found");
    }

    #[test]
    fn test_from_store_hides_io_detail() {
        let err = ApiError::from_store(
            StoreError::io("failed to write products", io::Error::other("/secret/path: EROFS")),
            "Failed to save new product".to_string(),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from(err);
        assert_eq!(body.message, "Failed to save new product");
        assert!(!body.message.contains("secret"));
    }

    #[test]
    fn test_validation_body_has_details() {
        let err = ApiError::Validation(ValidationErrors::single(
            "price",
            "Price must be positive",
        ));
        let json = serde_json::to_value(ErrorResponse::from(err)).unwrap();
        assert_eq!(json["code"], 400);
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["details"][0]["field"], "price");
        assert_eq!(json["details"][0]["message"], "Price must be positive");
    }
}
