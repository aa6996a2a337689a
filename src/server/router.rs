use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::server::{
    controller::{admin, auth, email, health, maintenance, pending_vehicle, reservation, vehicle},
    doc::ApiDoc,
    state::AppState,
};

/// Builds every API route together with its OpenAPI document.
pub fn router() -> (Router<AppState>, utoipa::openapi::OpenApi) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        // Customer accounts
        .routes(routes!(auth::register))
        .routes(routes!(auth::login))
        .routes(routes!(auth::logout))
        .routes(routes!(auth::get_current_account))
        .route("/api/auth/current", get(auth::get_current_account))
        .routes(routes!(auth::get_pending_requests))
        .routes(routes!(auth::approve_request))
        .routes(routes!(auth::reject_request))
        .routes(routes!(auth::get_customers))
        .routes(routes!(auth::delete_user))
        .routes(routes!(auth::request_password_reset))
        .routes(routes!(auth::verify_reset_code))
        .routes(routes!(auth::reset_password))
        // Admin accounts
        .routes(routes!(admin::register_admin))
        .routes(routes!(admin::login_admin))
        .routes(routes!(admin::logout_admin))
        .routes(routes!(admin::is_first_admin))
        .routes(routes!(admin::get_admins))
        .routes(routes!(admin::get_current_admin))
        .routes(routes!(admin::get_admin, admin::update_admin))
        .routes(routes!(admin::deactivate_admin))
        .routes(routes!(admin::activate_admin))
        .routes(routes!(admin::add_admin))
        .routes(routes!(admin::change_password))
        // Vehicles
        .routes(routes!(vehicle::get_available_vehicles))
        .routes(routes!(vehicle::search_vehicles))
        .routes(routes!(vehicle::get_locations))
        .routes(routes!(vehicle::get_types))
        .routes(routes!(vehicle::get_all_vehicles))
        .routes(routes!(vehicle::get_vehicle_stats))
        .routes(routes!(vehicle::add_vehicle))
        .routes(routes!(
            vehicle::get_vehicle,
            vehicle::update_vehicle,
            vehicle::delete_vehicle
        ))
        .routes(routes!(vehicle::update_vehicle_status))
        // Pending vehicle changes
        .routes(routes!(pending_vehicle::submit_add))
        .routes(routes!(pending_vehicle::submit_remove))
        .routes(routes!(pending_vehicle::submit_update))
        .routes(routes!(pending_vehicle::get_pending_changes))
        .routes(routes!(pending_vehicle::approve_change))
        .routes(routes!(pending_vehicle::reject_change))
        // Maintenance
        .routes(routes!(maintenance::get_all_records))
        .routes(routes!(maintenance::get_records_for_car))
        .routes(routes!(maintenance::create_record))
        .routes(routes!(maintenance::update_record, maintenance::delete_record))
        .routes(routes!(maintenance::submit_pending))
        .routes(routes!(maintenance::get_pending))
        .routes(routes!(maintenance::approve_pending))
        .routes(routes!(maintenance::reject_pending))
        // Reservations
        .routes(routes!(reservation::create_reservation))
        .routes(routes!(reservation::cancel_reservation))
        .routes(routes!(reservation::get_user_reservations))
        .routes(routes!(reservation::get_vehicle_reservations))
        .routes(routes!(reservation::get_all_reservations))
        // Email verification
        .routes(routes!(email::send_verification))
        .routes(routes!(email::verify_code))
        .routes(routes!(health::health))
        .split_for_parts()
}
