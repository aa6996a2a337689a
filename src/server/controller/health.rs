use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::ConnectionTrait;

use crate::{
    model::api::{ErrorDto, HealthDto},
    server::{error::AppError, state::AppState},
};

/// Tag for grouping health endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Liveness check that also pings the database.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is up", body = HealthDto),
        (status = 500, description = "Database unreachable", body = ErrorDto)
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state
        .db
        .execute_unprepared("SELECT 1")
        .await?;

    Ok((
        StatusCode::OK,
        Json(HealthDto {
            status: "UP".to_string(),
        }),
    ))
}
