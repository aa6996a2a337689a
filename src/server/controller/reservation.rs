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
        reservation::{CreateReservationDto, ReservationDto},
    },
    server::{
        error::{auth::AuthError, AppError},
        middleware::auth::{AuthGuard, Permission},
        model::{
            account::Principal,
            reservation::{CreateReservationParams, Reservation},
        },
        service::reservation::ReservationService,
        state::AppState,
    },
};

/// Tag for grouping reservation endpoints in OpenAPI documentation
pub static RESERVATION_TAG: &str = "reservation";

fn into_dtos(reservations: Vec<Reservation>) -> Vec<ReservationDto> {
    reservations.into_iter().map(|r| r.into_dto()).collect()
}

/// Customers may only act on their own reservations; admins on any.
fn ensure_access(principal: Principal, user_id: i32) -> Result<(), AppError> {
    if principal.can_access_user(user_id) {
        return Ok(());
    }

    Err(AuthError::AccessDenied(
        principal.id,
        format!("Attempted to access reservations of user {}", user_id),
    )
    .into())
}

/// Book a vehicle.
///
/// The submitted `totalPrice` must match the server-side quote (daily rate times
/// inclusive days, plus amenity surcharge) within 0.01. On success the vehicle is
/// marked `Rented` and a confirmation email is sent.
///
/// # Access Control
/// - `Customer` - Only for their own user ID
/// - `Admin` - For any customer
///
/// # Returns
/// - `200 OK` - The confirmed reservation
/// - `400 Bad Request` - Invalid dates, amenities, price mismatch or vehicle not available
/// - `404 Not Found` - Unknown vehicle or user
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = RESERVATION_TAG,
    request_body = CreateReservationDto,
    responses(
        (status = 200, description = "Reservation confirmed", body = ReservationDto),
        (status = 400, description = "Invalid reservation", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Booking for another customer", body = ErrorDto),
        (status = 404, description = "Vehicle or user not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<CreateReservationDto>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &session)
        .require(&[])
        .await?
        .principal();

    let params = CreateReservationParams::from_dto(payload)?;
    ensure_access(principal, params.user_id)?;

    let reservation = ReservationService::new(&state.db, &state.mailer)
        .create(params)
        .await?;

    Ok((StatusCode::OK, Json(reservation.into_dto())))
}

/// Cancel a reservation and release its vehicle.
///
/// # Access Control
/// - `Customer` - Only their own reservations
/// - `Admin` - Any reservation
#[utoipa::path(
    put,
    path = "/api/reservations/{id}/cancel",
    tag = RESERVATION_TAG,
    params(("id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ReservationDto),
        (status = 400, description = "Reservation is already cancelled", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Reservation belongs to another customer", body = ErrorDto),
        (status = 404, description = "Reservation not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &session)
        .require(&[])
        .await?
        .principal();

    let service = ReservationService::new(&state.db, &state.mailer);

    let reservation = service.get(id).await?;
    ensure_access(principal, reservation.user_id)?;

    let cancelled = service.cancel(id).await?;

    Ok((StatusCode::OK, Json(cancelled.into_dto())))
}

/// List a customer's reservations.
///
/// # Access Control
/// - `Customer` - Only their own
/// - `Admin` - Any customer
#[utoipa::path(
    get,
    path = "/api/reservations/user/{user_id}",
    tag = RESERVATION_TAG,
    params(("user_id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer reservations", body = Vec<ReservationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Another customer's reservations", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user_reservations(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let principal = AuthGuard::new(&state.db, &session)
        .require(&[])
        .await?
        .principal();

    ensure_access(principal, user_id)?;

    let reservations = ReservationService::new(&state.db, &state.mailer)
        .for_user(user_id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(reservations))))
}

/// List reservations for one vehicle.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/reservations/vehicle/{vehicle_id}",
    tag = RESERVATION_TAG,
    params(("vehicle_id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle reservations", body = Vec<ReservationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_vehicle_reservations(
    State(state): State<AppState>,
    session: Session,
    Path(vehicle_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let reservations = ReservationService::new(&state.db, &state.mailer)
        .for_vehicle(vehicle_id)
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(reservations))))
}

/// List every reservation.
///
/// # Access Control
/// - `Admin`
#[utoipa::path(
    get,
    path = "/api/reservations/all",
    tag = RESERVATION_TAG,
    responses(
        (status = 200, description = "All reservations", body = Vec<ReservationDto>),
        (status = 401, description = "Not authenticated", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_reservations(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let reservations = ReservationService::new(&state.db, &state.mailer)
        .all()
        .await?;

    Ok((StatusCode::OK, Json(into_dtos(reservations))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::{
        middleware::session::AuthSession, model::account::Role, service::mail::Mailer,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use test_utils::{builder::TestBuilder, factory};

    /// Tests the status code of a successful booking.
    ///
    /// Expected: 200 OK with the vehicle now rented
    #[tokio::test]
    async fn booking_responds_ok() -> Result<(), AppError> {
        let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
        let (db, session) = test.db_and_session().await.unwrap();

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
        AuthSession::new(session)
            .login(Principal {
                id: user.id,
                role: Role::Customer,
            })
            .await?;

        let state = AppState::new(db.clone(), Mailer::default());
        let payload = CreateReservationDto {
            vehicle_id: Some(vehicle.id),
            user_id: Some(user.id),
            rental_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            return_date: NaiveDate::from_ymd_opt(2024, 1, 3),
            amenities: Some(vec!["gps".to_string()]),
            total_price: Some(Decimal::new(16000, 2)),
        };

        let response = create_reservation(State(state), session.clone(), Json(payload))
            .await?
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        Ok(())
    }

    #[test]
    fn customers_are_limited_to_their_own_reservations() {
        let customer = Principal {
            id: 3,
            role: Role::Customer,
        };

        assert!(ensure_access(customer, 3).is_ok());
        assert!(matches!(
            ensure_access(customer, 4),
            Err(AppError::AuthErr(AuthError::AccessDenied(3, _)))
        ));
    }
}
