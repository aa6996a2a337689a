use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        vehicle::{
            VehicleDraftDto, VehicleDto, VehicleSearchQuery, VehicleStatsDto,
            VehicleStatusUpdateDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::vehicle::{Vehicle, VehicleDraft, VehicleImages, VehicleSearchParams},
        service::vehicle::VehicleService,
        state::AppState,
        util::multipart::FormData,
    },
};

/// Tag for grouping vehicle endpoints in OpenAPI documentation
pub static VEHICLE_TAG: &str = "vehicle";

const IMAGE_FIELDS: [&str; 3] = ["vehicleImage1", "vehicleImage2", "vehicleImage3"];

fn into_dtos(vehicles: Vec<Vehicle>) -> Vec<VehicleDto> {
    vehicles.into_iter().map(|v| v.into_dto()).collect()
}

/// List vehicles currently available for booking.
#[utoipa::path(
    get,
    path = "/api/vehicles/available",
    tag = VEHICLE_TAG,
    responses(
        (status = 200, description = "Available vehicles", body = Vec<VehicleDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_available_vehicles(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let vehicles = VehicleService::new(&state.db).available().await?;

    Ok((StatusCode::OK, Json(into_dtos(vehicles))))
}

/// Search vehicles by location, type and price range.
///
/// Filters are combined; status defaults to `Available` when omitted.
#[utoipa::path(
    get,
    path = "/api/vehicles/search",
    tag = VEHICLE_TAG,
    params(VehicleSearchQuery),
    responses(
        (status = 200, description = "Matching vehicles", body = Vec<VehicleDto>),
        (status = 400, description = "Invalid status filter", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleSearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let params = VehicleSearchParams::from_query(query)?;
    let vehicles = VehicleService::new(&state.db).search(params).await?;

    Ok((StatusCode::OK, Json(into_dtos(vehicles))))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/locations",
    tag = VEHICLE_TAG,
    responses(
        (status = 200, description = "Distinct vehicle locations", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_locations(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let locations = VehicleService::new(&state.db).locations().await?;

    Ok((StatusCode::OK, Json(locations)))
}

#[utoipa::path(
    get,
    path = "/api/vehicles/types",
    tag = VEHICLE_TAG,
    responses(
        (status = 200, description = "Distinct vehicle types", body = Vec<String>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_types(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let types = VehicleService::new(&state.db).types().await?;

    Ok((StatusCode::OK, Json(types)))
}

/// Get a vehicle by ID.
#[utoipa::path(
    get,
    path = "/api/vehicles/{id}",
    tag = VEHICLE_TAG,
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle", body = VehicleDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let vehicle = VehicleService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(vehicle.into_dto())))
}

/// List every vehicle regardless of status.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/vehicles/all",
    tag = VEHICLE_TAG,
    responses(
        (status = 200, description = "All vehicles", body = Vec<VehicleDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_vehicles(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let vehicles = VehicleService::new(&state.db).all().await?;

    Ok((StatusCode::OK, Json(into_dtos(vehicles))))
}

/// Fleet counts per status.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/vehicles/stats",
    tag = VEHICLE_TAG,
    responses(
        (status = 200, description = "Vehicle statistics", body = VehicleStatsDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vehicle_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let stats = VehicleService::new(&state.db).stats().await?;

    Ok((StatusCode::OK, Json(stats.into_dto())))
}

/// Add a vehicle directly to the fleet.
///
/// Accepts `multipart/form-data` with the vehicle fields in camelCase and up to
/// three image files `vehicleImage1`, `vehicleImage2`, `vehicleImage3`. The
/// vehicle starts as `Available`.
///
/// # Access Control
/// - `SuperAdmin`
///
/// # Returns
/// - `201 Created` - The new vehicle
/// - `400 Bad Request` - Field validation failed or an image is not an image
/// - `409 Conflict` - License plate or VIN already in use
#[utoipa::path(
    post,
    path = "/api/vehicles/add",
    tag = VEHICLE_TAG,
    responses(
        (status = 201, description = "Vehicle added", body = VehicleDto),
        (status = 400, description = "Invalid vehicle data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 409, description = "Duplicate plate or VIN", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_vehicle(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let mut form = FormData::read(multipart).await?;

    let dto = VehicleDraftDto {
        make: form.text("make"),
        model: form.text("model"),
        vehicle_type: form.text("vehicleType"),
        year: form.parse("year")?,
        color: form.text("color"),
        license_plate: form.text("licensePlate"),
        vin: form.text("vin"),
        fuel_type: form.text("fuelType"),
        transmission: form.text("transmission"),
        seating_capacity: form.parse("seatingCapacity")?,
        mileage: form.parse("mileage")?,
        price_per_day: form.parse("pricePerDay")?,
        location: form.text("location"),
        description: form.text("description"),
        features: form.text("features"),
    };
    let draft = VehicleDraft::from_dto(dto)?;

    let mut images = VehicleImages::default();
    for (index, field) in IMAGE_FIELDS.iter().enumerate() {
        if let Some(image) = form.image(field)? {
            images.set(index, image);
        }
    }

    let vehicle = VehicleService::new(&state.db).add(draft, images).await?;

    Ok((StatusCode::CREATED, Json(vehicle.into_dto())))
}

/// Replace a vehicle's descriptive fields. Status and images are kept.
///
/// # Access Control
/// - `SuperAdmin`
#[utoipa::path(
    put,
    path = "/api/vehicles/{id}",
    tag = VEHICLE_TAG,
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = VehicleDraftDto,
    responses(
        (status = 200, description = "Vehicle updated", body = VehicleDto),
        (status = 400, description = "Invalid vehicle data", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 409, description = "Duplicate plate or VIN", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<VehicleDraftDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    let draft = VehicleDraft::from_dto(payload)?;
    let vehicle = VehicleService::new(&state.db).update(id, draft).await?;

    Ok((StatusCode::OK, Json(vehicle.into_dto())))
}

/// Set a vehicle's status.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    patch,
    path = "/api/vehicles/{id}/status",
    tag = VEHICLE_TAG,
    params(("id" = i32, Path, description = "Vehicle ID")),
    request_body = VehicleStatusUpdateDto,
    responses(
        (status = 200, description = "Status updated", body = VehicleDto),
        (status = 400, description = "Missing or invalid status", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_vehicle_status(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(payload): Json<VehicleStatusUpdateDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let vehicle = VehicleService::new(&state.db)
        .set_status(id, payload.status)
        .await?;

    Ok((StatusCode::OK, Json(vehicle.into_dto())))
}

/// Delete a vehicle with its cancelled reservations and maintenance history.
///
/// # Access Control
/// - `SuperAdmin`
///
/// # Returns
/// - `200 OK` - Vehicle deleted
/// - `404 Not Found` - Unknown vehicle
/// - `409 Conflict` - The vehicle has confirmed reservations
#[utoipa::path(
    delete,
    path = "/api/vehicles/{id}",
    tag = VEHICLE_TAG,
    params(("id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle deleted", body = MessageDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not a super admin", body = ErrorDto),
        (status = 404, description = "Vehicle not found", body = ErrorDto),
        (status = 409, description = "Vehicle has active reservations", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::SuperAdmin])
        .await?;

    VehicleService::new(&state.db).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Vehicle deleted successfully")),
    ))
}
