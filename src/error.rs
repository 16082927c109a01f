//! Error handling module
//!
//! HTTP-facing error type and response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::IngestError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    // Ingestion errors
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 404 Not Found
            AppError::CustomerNotFound(id) => {
                (StatusCode::NOT_FOUND, "customer_not_found", Some(id.clone()))
            }

            AppError::Ingest(ingest_err) => match ingest_err {
                IngestError::Decode(e) => {
                    (StatusCode::BAD_REQUEST, "decode_error", Some(e.to_string()))
                }
                IngestError::InvalidAmount { order_key, .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "invalid_amount",
                    Some(order_key.clone()),
                ),
            },
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AmountError, DecodeError};

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (AppError::InvalidRequest("k".to_string()), StatusCode::BAD_REQUEST),
            (AppError::CustomerNotFound("c1".to_string()), StatusCode::NOT_FOUND),
            (
                AppError::Ingest(DecodeError::MissingField("key").into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Ingest(IngestError::invalid_amount(
                    "o1",
                    AmountError::Parse("x".to_string()),
                )),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
