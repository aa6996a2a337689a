use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        pending::{PendingVehicleChangeDto, RejectDto},
        vehicle::VehicleDraftDto,
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::{pending::VehicleChange, vehicle::VehicleDraft},
        service::pending_vehicle::PendingVehicleService,
        state::AppState,
    },
};

/// Tag for grouping pending vehicle change endpoints in OpenAPI documentation
pub static PENDING_VEHICLE_TAG: &str = "pending-vehicle";

async fn submit(
    state: &AppState,
    session: &Session,
    change: impl FnOnce() -> Result<VehicleChange, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, session)
        .require(&[Permission::Admin])
        .await?
        .principal();

    let pending = PendingVehicleService::new(&state.db)
        .submit(principal, change()?)
        .await?;

    Ok((StatusCode::CREATED, Json(pending.into_dto())))
}

/// Stage a new vehicle for super-admin approval.
///
/// # Access Control
/// - `Admin` - Super admins get 403 and should add vehicles directly
#[utoipa::path(
    post,
    path = "/api/vehicles/pending/add",
    tag = PENDING_VEHICLE_TAG,
    request_body = VehicleDraftDto,
    responses(
        (status = 201, description = "Change staged", body = PendingVehicleChangeDto),
        (status = 400, description = "Invalid vehicle data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or a super admin", body = ErrorDto),
        (status = 409, description = "Duplicate plate or VIN", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_add(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<VehicleDraftDto>,
) -> Result<impl IntoResponse, AppError> {
    submit(&state, &session, move || {
        Ok(VehicleChange::Add(VehicleDraft::from_dto(payload)?))
    })
    .await
}

/// Stage the removal of a vehicle.
///
/// # Access Control
/// - `Admin` - Super admins get 403 and should delete vehicles directly
#[utoipa::path(
    post,
    path = "/api/vehicles/pending/remove/{vehicle_id}",
    tag = PENDING_VEHICLE_TAG,
    params(("vehicle_id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 201, description = "Change staged", body = PendingVehicleChangeDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or a super admin", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_remove(
    State(state): State<AppState>,
    session: Session,
    Path(vehicle_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    submit(&state, &session, move || Ok(VehicleChange::Remove { vehicle_id })).await
}

/// Stage new descriptive fields for an existing vehicle.
///
/// # Access Control
/// - `Admin` - Super admins get 403 and should update vehicles directly
#[utoipa::path(
    post,
    path = "/api/vehicles/pending/update/{vehicle_id}",
    tag = PENDING_VEHICLE_TAG,
    params(("vehicle_id" = i32, Path, description = "Vehicle ID")),
    request_body = VehicleDraftDto,
    responses(
        (status = 201, description = "Change staged", body = PendingVehicleChangeDto),
        (status = 400, description = "Invalid vehicle data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or a super admin", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 409, description = "Duplicate plate or VIN", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_update(
    State(state): State<AppState>,
    session: Session,
    Path(vehicle_id): Path<i32>,
    Json(payload): Json<VehicleDraftDto>,
) -> Result<impl IntoResponse, AppError> {
    submit(&state, &session, move || {
        Ok(VehicleChange::Update {
            vehicle_id,
            draft: VehicleDraft::from_dto(payload)?,
        })
    })
    .await
}

/// List vehicle changes awaiting review.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    get,
    path = "/api/vehicles/pending/all",
    tag = PENDING_VEHICLE_TAG,
    responses(
        (status = 200, description = "Pending vehicle changes", body = Vec<PendingVehicleChangeDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pending_changes(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let changes = PendingVehicleService::new(&state.db).pending().await?;
    let dtos: Vec<PendingVehicleChangeDto> = changes.into_iter().map(|c| c.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Approve a staged change and apply it to the fleet.
///
/// # Access Control
/// - `SuperAdmin`
///
/// # Returns
/// - `200 OK` - The resolved request
/// - `404 Not Found` - Unknown request, or its vehicle no longer exists
/// - `409 Conflict` - Request already resolved, or the change would duplicate a plate/VIN
#[utoipa::path(
    post,
    path = "/api/vehicles/pending/{id}/approve",
    tag = PENDING_VEHICLE_TAG,
    params(("id" = i32, Path, description = "Pending change ID")),
    responses(
        (status = 200, description = "Change approved and applied", body = PendingVehicleChangeDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Pending request not found", body = ErrorDto),
        (status = 409, description = "Request is not in pending status", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_change(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let reviewer = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?
        .principal();

    let change = PendingVehicleService::new(&state.db)
        .approve(id, reviewer.id)
        .await?;

    Ok((StatusCode::OK, Json(change.into_dto())))
}

/// Reject a staged change. The fleet is left untouched.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    post,
    path = "/api/vehicles/pending/{id}/reject",
    tag = PENDING_VEHICLE_TAG,
    params(("id" = i32, Path, description = "Pending change ID")),
    request_body(content = Option<RejectDto>, description = "Optional rejection reason"),
    responses(
        (status = 200, description = "Change rejected", body = PendingVehicleChangeDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Pending request not found", body = ErrorDto),
        (status = 409, description = "Request is not in pending status", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_change(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    payload: Option<Json<RejectDto>>,
) -> Result<impl IntoResponse, AppError> {
    let reviewer = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?
        .principal();

    let reason = payload.and_then(|Json(dto)| dto.reason);
    let change = PendingVehicleService::new(&state.db)
        .reject(id, reviewer.id, reason)
        .await?;

    Ok((StatusCode::OK, Json(change.into_dto())))
}
