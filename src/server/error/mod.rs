//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into appropriate HTTP responses. The `AppError` enum serves
//! as the top-level error type that wraps domain-specific errors and implements
//! `IntoResponse` for automatic error handling in API endpoints.

pub mod auth;
pub mod config;

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError},
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Most variants use `#[from]` for automatic
/// error conversion. Domain-specific errors like `AuthError` handle their own response
/// mapping, while generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for status code mapping
    /// (401 Unauthorized or 403 Forbidden).
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx driver error, raised by the session store migration.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    /// Session store operation error.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// Password hashing or verification failed inside bcrypt.
    #[error(transparent)]
    PasswordHashErr(#[from] bcrypt::BcryptError),

    /// Stored JSON payload could not be (de)serialized.
    #[error(transparent)]
    SerdeErr(#[from] serde_json::Error),

    /// HTTP client request error from reqwest, raised by the mail transport.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Listener bind or serve failure.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Malformed multipart body.
    ///
    /// Results in 400 Bad Request.
    #[error(transparent)]
    MultipartErr(#[from] MultipartError),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Caller is authenticated but the operation is not allowed for them.
    ///
    /// Results in 403 Forbidden with the provided error message.
    #[error("{0}")]
    Forbidden(String),

    /// Request conflicts with current state (duplicate key, already processed).
    ///
    /// Results in 409 Conflict with the provided error message.
    #[error("{0}")]
    Conflict(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The provided message is logged
    /// but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

/// Converts application errors into HTTP responses.
///
/// Maps each error variant to an appropriate HTTP status code and response body.
/// Authentication errors delegate to their own response handling, while other errors
/// use standard mappings. Internal errors are logged with full details but return
/// generic messages to avoid information leakage.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` and `MultipartErr`
/// - 403 Forbidden - For `Forbidden`
/// - 404 Not Found - For `NotFound`
/// - 409 Conflict - For `Conflict`
/// - 500 Internal Server Error - For all other error types (DbErr, SessionErr, etc.)
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(ErrorDto { error: msg })).into_response()
            }
            Self::MultipartErr(err) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: format!("Invalid multipart body: {}", err.body_text()),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests status code mapping for the client error variants.
    ///
    /// Expected: 400, 403, 404 and 409 respectively
    #[test]
    fn client_errors_map_to_status_codes() {
        let cases = [
            (AppError::bad_request("bad"), StatusCode::BAD_REQUEST),
            (AppError::Forbidden("no".to_string()), StatusCode::FORBIDDEN),
            (AppError::not_found("gone"), StatusCode::NOT_FOUND),
            (AppError::conflict("dupe"), StatusCode::CONFLICT),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    /// Tests that internal errors never expose their message.
    ///
    /// Expected: 500 status
    #[test]
    fn internal_error_is_500() {
        let response = AppError::InternalError("secret detail".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::from(sea_orm::DbErr::Custom("boom".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
