use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        admin::{AdminDto, ChangePasswordDto, CreateAdminDto, FirstAdminDto, UpdateAdminDto},
        api::{ErrorDto, MessageDto},
        user::{AccountDto, LoginDto},
    },
    server::{
        error::AppError,
        middleware::{
            auth::{AuthGuard, Permission},
            session::AuthSession,
        },
        model::admin::{CreateAdminParams, UpdateAdminParams},
        service::{admin::AdminService, auth::AuthService},
        state::AppState,
    },
};

/// Tag for grouping admin account endpoints in OpenAPI documentation
pub static ADMIN_TAG: &str = "admin";

/// Register the first admin account.
///
/// Only allowed while no admin exists. The account becomes a super admin.
///
/// # Returns
/// - `201 Created` - The new super admin
/// - `400 Bad Request` - Missing username/email or short password
/// - `403 Forbidden` - An admin already exists
#[utoipa::path(
    post,
    path = "/api/admin/register",
    tag = ADMIN_TAG,
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "First admin created", body = AdminDto),
        (status = 400, description = "Invalid admin data", body = ErrorDto),
        (status = 403, description = "Registration closed", body = ErrorDto),
        (status = 409, description = "Duplicate username or email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register_admin(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CreateAdminParams::from_dto(payload)?;

    let admin = AdminService::new(&state.db, &state.mailer)
        .register_first(params)
        .await?;

    Ok((StatusCode::CREATED, Json(admin.into_dto())))
}

/// Log in as an admin by username or email.
///
/// Customers are rejected here with the same error as a wrong password.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = ADMIN_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AccountDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login_admin(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthService::new(&state.db)
        .login_admin(payload.email.trim(), &payload.password)
        .await?;

    AuthSession::new(&session).login(principal).await?;

    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/logout",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout_admin(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).logout().await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Logged out successfully"))))
}

/// Whether the admin table is still empty.
#[utoipa::path(
    get,
    path = "/api/admin/is-first-admin",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "First admin flag", body = FirstAdminDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn is_first_admin(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let is_first_admin = AdminService::new(&state.db, &state.mailer)
        .is_first_admin()
        .await?;

    Ok((StatusCode::OK, Json(FirstAdminDto { is_first_admin })))
}

/// List all admin accounts.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/all",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Admin accounts", body = Vec<AdminDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admins(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let admins = AdminService::new(&state.db, &state.mailer).list().await?;
    let dtos: Vec<AdminDto> = admins.into_iter().map(|a| a.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Get the admin account behind the current session.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/current",
    tag = ADMIN_TAG,
    responses(
        (status = 200, description = "Current admin", body = AccountDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_admin(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    Ok((StatusCode::OK, Json(account.into_dto())))
}

/// Get an admin account by ID.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/admin/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin account", body = AdminDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let admin = AdminService::new(&state.db, &state.mailer).get(id).await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Update an admin's profile.
///
/// # Access Control
/// - `SuperAdmin` - Any admin account
/// - `Admin` - Only their own account
#[utoipa::path(
    put,
    path = "/api/admin/{id}",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Admin ID")),
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Admin updated", body = AdminDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not allowed to edit this admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 409, description = "Duplicate username or email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?
        .principal();

    if !principal.is_super_admin() && principal.id != id {
        return Err(AppError::Forbidden(
            "You can only update your own account".to_string(),
        ));
    }

    let admin = AdminService::new(&state.db, &state.mailer)
        .update(id, UpdateAdminParams::from_dto(payload))
        .await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Deactivate an admin account. The last active admin cannot be deactivated.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    post,
    path = "/api/admin/{id}/deactivate",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin deactivated", body = AdminDto),
        (status = 400, description = "Last active admin", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn deactivate_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let admin = AdminService::new(&state.db, &state.mailer)
        .deactivate(id)
        .await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Reactivate an admin account.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    post,
    path = "/api/admin/{id}/activate",
    tag = ADMIN_TAG,
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin activated", body = AdminDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Admin not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn activate_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let admin = AdminService::new(&state.db, &state.mailer)
        .activate(id)
        .await?;

    Ok((StatusCode::OK, Json(admin.into_dto())))
}

/// Create a regular admin account and email its credentials.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    post,
    path = "/api/admin/add-admin",
    tag = ADMIN_TAG,
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = AdminDto),
        (status = 400, description = "Invalid admin data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 409, description = "Duplicate username or email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_admin(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateAdminDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let params = CreateAdminParams::from_dto(payload)?;
    let admin = AdminService::new(&state.db, &state.mailer)
        .add_admin(params)
        .await?;

    Ok((StatusCode::CREATED, Json(admin.into_dto())))
}

/// Change the current admin's password.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    post,
    path = "/api/admin/change-password",
    tag = ADMIN_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageDto),
        (status = 400, description = "Wrong current password or short new password", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?
        .principal();

    AdminService::new(&state.db, &state.mailer)
        .change_password(principal.id, &payload.current_password, &payload.new_password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Password changed successfully")),
    ))
}
