//! Application error handling
//!
//! Converts calculator and request failures into JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use health_calculators_shared::errors::{CatalogError, InvalidInputError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// Short outcome label used in logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "invalid",
            ApiError::NotFound(_) => "not_found",
            ApiError::BadRequest(_) => "malformed",
            ApiError::Internal(_) => "error",
        }
    }
}

impl From<InvalidInputError> for ApiError {
    fn from(err: InvalidInputError) -> Self {
        ApiError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownCalculator(slug) => {
                ApiError::NotFound(format!("Calculator '{}' does not exist", slug))
            }
            CatalogError::MalformedInput(e) => ApiError::BadRequest(e.to_string()),
            CatalogError::InvalidInput(e) => e.into(),
            CatalogError::EncodeOutput(e) => ApiError::Internal(anyhow::Error::new(e)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field) = match &self {
            ApiError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                message.to_string(),
                Some(field.to_string()),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone(), None),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::from(InvalidInputError::new("percent", "Out of range"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::from(CatalogError::UnknownCalculator("nope".to_string()));
        assert_eq!(error.outcome(), "not_found");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_malformed_input_is_bad_request() {
        let serde_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let error = ApiError::from(CatalogError::MalformedInput(serde_err));
        assert!(matches!(error, ApiError::BadRequest(_)));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_output_encoding_failure_is_internal() {
        let serde_err = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let error = ApiError::from(CatalogError::EncodeOutput(serde_err));
        assert!(matches!(error, ApiError::Internal(_)));
        assert_eq!(error.outcome(), "error");
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::from(anyhow::anyhow!("boom"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_validation_body_carries_field() {
        let response =
            ApiError::from(InvalidInputError::new("height_cm", "Height must be greater than 0"))
                .into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "height_cm");
        assert_eq!(body["error"]["message"], "Height must be greater than 0");
    }
}
