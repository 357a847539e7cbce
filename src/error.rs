//! Error types and HTTP error response handling.
//!
//! This module defines the errors that escape a handler and how they are
//! converted into HTTP responses with appropriate status codes and JSON bodies.
//!
//! A failed write in the add handler is *not* an `AppError`: it is answered
//! with an ordinary `500 {"message": ...}` body. Only validation failures and
//! faults of the read path travel through this type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::store::StoreError;

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Validation Errors**: Request body fails the field checks
/// - **Store Errors**: The table client failed and the handler propagates it
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body is invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String names the offending field.
    #[error("{0}")]
    Validation(String),

    /// Table client operation failed.
    ///
    /// Returns HTTP 502 Bad Gateway, the status a gateway reports for a
    /// faulted invocation. Store details are logged, never sent to the client.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `Validation` → 400 Bad Request
/// - `Store` → 502 Bad Gateway (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_failed", msg),
            AppError::Store(_) => (
                StatusCode::BAD_GATEWAY,
                "store_unavailable",
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
