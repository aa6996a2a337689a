use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        maintenance::{MaintenanceInputDto, MaintenanceRecordDto},
        pending::{PendingMaintenanceDto, RejectDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::maintenance::{MaintenanceDraft, MaintenanceRecord},
        service::{
            maintenance::MaintenanceService, pending_maintenance::PendingMaintenanceService,
        },
        state::AppState,
    },
};

/// Tag for grouping maintenance endpoints in OpenAPI documentation
pub static MAINTENANCE_TAG: &str = "maintenance";

fn into_dtos(records: Vec<MaintenanceRecord>) -> Vec<MaintenanceRecordDto> {
    records.into_iter().map(|r| r.into_dto()).collect()
}

/// List every maintenance record.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/maintenance/all",
    tag = MAINTENANCE_TAG,
    responses(
        (status = 200, description = "Maintenance records", body = Vec<MaintenanceRecordDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_records(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let records = MaintenanceService::new(&state.db).all().await?;

    Ok((StatusCode::OK, Json(into_dtos(records))))
}

/// List maintenance records for one vehicle.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/maintenance/car/{car_id}",
    tag = MAINTENANCE_TAG,
    params(("car_id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Maintenance records for the vehicle", body = Vec<MaintenanceRecordDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_records_for_car(
    State(state): State<AppState>,
    session: Session,
    Path(car_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let records = MaintenanceService::new(&state.db).for_car(car_id).await?;

    Ok((StatusCode::OK, Json(into_dtos(records))))
}

/// Record completed maintenance directly.
///
/// `nextDate` defaults to three months after `date` and `status` to `Completed`.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    post,
    path = "/api/maintenance/create",
    tag = MAINTENANCE_TAG,
    request_body = MaintenanceInputDto,
    responses(
        (status = 201, description = "Maintenance record created", body = MaintenanceRecordDto),
        (status = 400, description = "Missing car, type or date", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_record(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<MaintenanceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let draft = MaintenanceDraft::from_dto(payload)?;
    let record = MaintenanceService::new(&state.db).create(draft).await?;

    Ok((StatusCode::CREATED, Json(record.into_dto())))
}

/// Replace a maintenance record's fields.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    put,
    path = "/api/maintenance/{id}",
    tag = MAINTENANCE_TAG,
    params(("id" = i32, Path, description = "Maintenance record ID")),
    request_body = MaintenanceInputDto,
    responses(
        (status = 200, description = "Maintenance record updated", body = MaintenanceRecordDto),
        (status = 400, description = "Missing car, type or date", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Record or vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_record(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<MaintenanceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let draft = MaintenanceDraft::from_dto(payload)?;
    let record = MaintenanceService::new(&state.db).update(id, draft).await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    delete,
    path = "/api/maintenance/{id}",
    tag = MAINTENANCE_TAG,
    params(("id" = i32, Path, description = "Maintenance record ID")),
    responses(
        (status = 200, description = "Maintenance record deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Maintenance record not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_record(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    MaintenanceService::new(&state.db).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Maintenance record deleted successfully")),
    ))
}

/// Stage a maintenance event for super-admin approval.
///
/// # Access Control
/// - `Admin` - Super admins get 403 and should create records directly
#[utoipa::path(
    post,
    path = "/api/maintenance/pending/add",
    tag = MAINTENANCE_TAG,
    request_body = MaintenanceInputDto,
    responses(
        (status = 201, description = "Maintenance event staged", body = PendingMaintenanceDto),
        (status = 400, description = "Missing car, type or date", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin, or a super admin", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_pending(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<MaintenanceInputDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?
        .principal();

    let draft = MaintenanceDraft::from_dto(payload)?;
    let pending = PendingMaintenanceService::new(&state.db)
        .submit(principal, draft)
        .await?;

    Ok((StatusCode::CREATED, Json(pending.into_dto())))
}

/// List staged maintenance events awaiting review.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    get,
    path = "/api/maintenance/pending/all",
    tag = MAINTENANCE_TAG,
    responses(
        (status = 200, description = "Pending maintenance events", body = Vec<PendingMaintenanceDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pending(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let pending = PendingMaintenanceService::new(&state.db).pending().await?;
    let dtos: Vec<PendingMaintenanceDto> = pending.into_iter().map(|p| p.into_dto()).collect();

    Ok((StatusCode::OK, Json(dtos)))
}

/// Approve a staged maintenance event, creating the permanent record.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    post,
    path = "/api/maintenance/pending/{id}/approve",
    tag = MAINTENANCE_TAG,
    params(("id" = i32, Path, description = "Pending maintenance ID")),
    responses(
        (status = 200, description = "Maintenance record created", body = MaintenanceRecordDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Pending request not found", body = ErrorDto),
        (status = 409, description = "Request is not in pending status", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn approve_pending(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let reviewer = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?
        .principal();

    let record = PendingMaintenanceService::new(&state.db)
        .approve(id, reviewer.id)
        .await?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

/// Reject a staged maintenance event.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    post,
    path = "/api/maintenance/pending/{id}/reject",
    tag = MAINTENANCE_TAG,
    params(("id" = i32, Path, description = "Pending maintenance ID")),
    request_body(content = Option<RejectDto>, description = "Optional rejection reason"),
    responses(
        (status = 200, description = "Maintenance event rejected", body = PendingMaintenanceDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Pending request not found", body = ErrorDto),
        (status = 409, description = "Request is not in pending status", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reject_pending(
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
    let pending = PendingMaintenanceService::new(&state.db)
        .reject(id, reviewer.id, reason)
        .await?;

    Ok((StatusCode::OK, Json(pending.into_dto())))
}
