use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No principal is stored in the session.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Login failed. Unknown account, inactive account and wrong password all
    /// produce this same error.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The session refers to an account that no longer exists or is no longer
    /// active/approved.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Account {0} from session is no longer valid")]
    AccountNotFound(i32),

    /// The principal lacks the role required by the endpoint.
    ///
    /// Results in a 403 Forbidden response. The message is logged only.
    #[error("Account {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `NotAuthenticated` / `AccountNotFound` → 401 with "Not authenticated"
/// - `InvalidCredentials` → 401 with "Invalid credentials"
/// - `AccessDenied` → 403 with "Access denied"
///
/// Errors are logged at debug level while the client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::NotAuthenticated | Self::AccountNotFound(_) => {
                (StatusCode::UNAUTHORIZED, "Not authenticated")
            }
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            Self::AccessDenied(..) => (StatusCode::FORBIDDEN, "Access denied"),
        };

        (
            status,
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
