mod admin;
mod pending_maintenance;
mod pending_vehicle_change;
mod registration_request;
mod reservation;
mod vehicle;
