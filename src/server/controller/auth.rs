use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{
            AccountDto, LoginDto, PasswordResetRequestDto, RegistrationRequestDto,
            ResetPasswordDto, UserDto, VerifyResetCodeDto,
        },
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            session::AuthSession,
        },
        model::user::RegistrationForm,
        service::{
            auth::AuthService,
            registration::RegistrationService,
            user::{PasswordResetService, UserService},
        },
        state::AppState,
        util::multipart::FormData,
    },
};

/// Tag for grouping customer account endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Submit a customer registration request.
///
/// Accepts `multipart/form-data` with the text fields `firstName`, `lastName`,
/// `phoneNumber`, `email`, `password`, `driversLicenseNumber` and an optional
/// `driversLicenseImage` file. The request waits for admin approval before the
/// customer can log in.
///
/// # Returns
/// - `200 OK` - Registration request stored as PENDING
/// - `400 Bad Request` - Field validation failed or the image is not an image
/// - `409 Conflict` - Email or license already registered or pending
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Registration request submitted", body = RegistrationRequestDto),
        (status = 400, description = "Invalid registration data", body = ErrorDto),
        (status = 409, description = "Duplicate email or license", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = FormData::read(multipart).await?;

    let registration = RegistrationForm {
        first_name: form.text("firstName").unwrap_or_default(),
        last_name: form.text("lastName").unwrap_or_default(),
        phone_number: form.text("phoneNumber").unwrap_or_default(),
        email: form.text("email").unwrap_or_default(),
        password: form.text("password").unwrap_or_default(),
        drivers_license_number: form.text("driversLicenseNumber").unwrap_or_default(),
        drivers_license_image: form.image("driversLicenseImage")?,
    };

    let service = RegistrationService::new(&state.db, &state.mailer);
    let request = service.submit(registration).await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// Log in as a customer or admin.
///
/// Admins may use their username or email; customers use their email. On success
/// the session cookie is rotated and carries the principal.
///
/// # Returns
/// - `200 OK` - The logged-in account
/// - `401 Unauthorized` - Unknown account, inactive account or wrong password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AccountDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthService::new(&state.db)
        .login(payload.email.trim(), &payload.password)
        .await?;

    AuthSession::new(&session).login(principal).await?;

    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// Log out and destroy the session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).logout().await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out successfully"))))
}

/// Get the account behind the current session.
///
/// Served at both `/api/auth/me` and `/api/auth/current`.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Current account", body = AccountDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_account(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session).require(&[]).await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// List registration requests awaiting review.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/auth/requests/pending",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Pending registration requests", body = Vec<RegistrationRequestDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pending_requests(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let requests = RegistrationService::new(&state.db, &state.mailer)
        .pending()
        .await?;

    let dtos: Vec<RegistrationRequestDto> =
        requests.into_iter().map(|r| r.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Approve a registration request, creating the customer account.
///
/// # Access Control
/// - `Admin`
///
/// # Returns
/// - `200 OK` - The new customer account
/// - `404 Not Found` - Unknown request
/// - `409 Conflict` - Request already processed or email taken meanwhile
#[utoipa::path(
    post,
    path = "/api/auth/approve/{id}",
    tag = AUTH_TAG,
    params(("id" = i32, Path, description = "Registration request ID")),
    responses(
        (status = 200, description = "Customer account created", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Registration request not found", body = ErrorDto),
        (status = 409, description = "Request already processed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let user = RegistrationService::new(&state.db, &state.mailer)
        .approve(id)
        .await?;

    Ok((StatusCode::OK, Json(user.into_dto())))
}

/// Reject a registration request.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/auth/reject/{id}",
    tag = AUTH_TAG,
    params(("id" = i32, Path, description = "Registration request ID")),
    responses(
        (status = 200, description = "Request rejected", body = RegistrationRequestDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Registration request not found", body = ErrorDto),
        (status = 409, description = "Request already processed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_request(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let request = RegistrationService::new(&state.db, &state.mailer)
        .reject(id)
        .await?;

    Ok((StatusCode::OK, Json(request.into_dto())))
}

/// List approved customer accounts.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/auth/users/customers",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Customer accounts", body = Vec<UserDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_customers(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let customers = UserService::new(&state.db).customers().await?;
    let dtos: Vec<UserDto> = customers.into_iter().map(|u| u.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Delete a customer account.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    delete,
    path = "/api/auth/users/{id}",
    tag = AUTH_TAG,
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    UserService::new(&state.db).delete(id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("User deleted successfully"))))
}

/// Email a password reset code to a registered customer.
#[utoipa::path(
    post,
    path = "/api/auth/request-password-reset",
    tag = AUTH_TAG,
    request_body = PasswordResetRequestDto,
    responses(
        (status = 200, description = "Reset code sent", body = MessageDto),
        (status = 400, description = "Missing or non-gmail address", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetRequestDto>,
) -> Result<impl IntoResponse, AppError> {
    PasswordResetService::new(&state.db, &state.reset_codes, &state.mailer)
        .request(&payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password reset code sent to your email")),
    ))
}

/// Check a reset code without spending it.
#[utoipa::path(
    post,
    path = "/api/auth/verify-reset-code",
    tag = AUTH_TAG,
    request_body = VerifyResetCodeDto,
    responses(
        (status = 200, description = "Code is valid", body = MessageDto),
        (status = 400, description = "Invalid or expired reset code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_reset_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyResetCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    PasswordResetService::new(&state.db, &state.reset_codes, &state.mailer)
        .verify(&payload.email, &payload.reset_token)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Reset code verified successfully")),
    ))
}

/// Set a new password using a reset code. The code is spent.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password updated", body = MessageDto),
        (status = 400, description = "Invalid code or weak password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    PasswordResetService::new(&state.db, &state.reset_codes, &state.mailer)
        .reset(&payload.email, &payload.reset_token, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password has been reset successfully")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::service::mail::Mailer;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header::CONTENT_TYPE, Request},
    };
    use test_utils::builder::TestBuilder;

    const BOUNDARY: &str = "rentals-form-boundary";

    async fn multipart(fields: &[(&str, &str)]) -> Multipart {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }

    /// Tests the status code of a registration submission.
    ///
    /// Expected: 200 OK with the request stored as PENDING
    #[tokio::test]
    async fn register_responds_ok() -> Result<(), AppError> {
        let test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();
        let state = AppState::new(db.clone(), Mailer::default());

        let form = multipart(&[
            ("firstName", "Ana"),
            ("lastName", "Silva"),
            ("phoneNumber", "5551234"),
            ("email", "ana.silva@gmail.com"),
            ("password", "Secret#123"),
            ("driversLicenseNumber", "7654321"),
        ])
        .await;

        let response = register(State(state), form).await?.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(RegistrationService::new(db, &Mailer::default()).pending().await?.len(), 1);

        Ok(())
    }
}
