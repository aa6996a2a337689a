use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        email::{SendVerificationDto, VerifyCodeDto},
    },
    server::{error::AppError, service::email::EmailVerificationService, state::AppState},
};

/// Tag for grouping email verification endpoints in OpenAPI documentation
pub static EMAIL_TAG: &str = "email";

/// Email a six-digit verification code, valid for ten minutes.
#[utoipa::path(
    post,
    path = "/api/email/send-verification",
    tag = EMAIL_TAG,
    request_body = SendVerificationDto,
    responses(
        (status = 200, description = "Verification code sent", body = MessageDto),
        (status = 400, description = "Missing or non-gmail address", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn send_verification(
    State(state): State<AppState>,
    Json(payload): Json<SendVerificationDto>,
) -> Result<impl IntoResponse, AppError> {
    EmailVerificationService::new(&state.verification_codes, &state.mailer)
        .send(&payload.email)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Verification code sent successfully")),
    ))
}

/// Check and spend a verification code.
#[utoipa::path(
    post,
    path = "/api/email/verify-code",
    tag = EMAIL_TAG,
    request_body = VerifyCodeDto,
    responses(
        (status = 200, description = "Email verified", body = MessageDto),
        (status = 400, description = "Invalid or expired verification code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn verify_code(
    State(state): State<AppState>,
    Json(payload): Json<VerifyCodeDto>,
) -> Result<impl IntoResponse, AppError> {
    EmailVerificationService::new(&state.verification_codes, &state.mailer)
        .verify(&payload.email, &payload.code)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Email verified successfully")),
    ))
}
