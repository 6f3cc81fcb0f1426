//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP
//! responses. All errors implement `IntoResponse` to provide consistent
//! error formatting.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Every failure a request can end in is represented here and mapped to a
/// status code via `IntoResponse`. Best-effort image deletion failures are
/// deliberately absent: those are logged at the call site and swallowed,
/// never surfaced to the caller.
#[derive(Error, Debug)]
pub enum AppError {
    /// Path category token is not one of the known product categories
    #[error("Invalid product category: {0}")]
    InvalidCategory(String),

    /// Request payload failed a presence check
    #[error("Validation error: {0}")]
    Validation(String),

    /// No product with the given id exists in the addressed category
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Multipart body could not be read
    #[error("Malformed multipart request: {0}")]
    Multipart(#[from] MultipartError),

    /// Upload store write failure
    #[error("Upload store error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
