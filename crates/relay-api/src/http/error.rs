//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use relay_types::error::{DeliveryError, RelayError, RepositoryError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Store(RepositoryError),
    Delivery(DeliveryError),
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Store(e)
    }
}

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Store(e) => AppError::Store(e),
            RelayError::Delivery(e) => AppError::Delivery(e),
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Store(RepositoryError::Connection) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
            }
            AppError::Store(RepositoryError::Throttled) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_THROTTLED")
            }
            AppError::Store(RepositoryError::Malformed(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MALFORMED_RECORD")
            }
            AppError::Store(RepositoryError::Query(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR")
            }
            AppError::Delivery(DeliveryError::Gone(_)) => (StatusCode::GONE, "CONNECTION_GONE"),
            AppError::Delivery(DeliveryError::Failed(_)) => {
                (StatusCode::BAD_GATEWAY, "DELIVERY_FAILED")
            }
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Store(e) => e.to_string(),
            AppError::Delivery(e) => e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        tracing::warn!(%status, code, "request failed: {}", self.message());

        let body = serde_json::to_string(&ApiResponse::error(code, &self.message(), String::new()))
            .unwrap_or_else(|_| {
                r#"{"errors":[{"code":"SERIALIZATION_ERROR","message":"Failed to serialize response"}]}"#
                    .to_string()
            });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
