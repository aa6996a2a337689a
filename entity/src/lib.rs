//! SeaORM entity models for the rental backend.
//!
//! One module per table plus the string-backed enums shared between them.

pub mod prelude;

pub mod admin;
pub mod maintenance_record;
pub mod pending_maintenance_record;
pub mod pending_vehicle_change;
pub mod registration_request;
pub mod reservation;
pub mod reservation_amenity;
pub mod sea_orm_active_enums;
pub mod user;
pub mod vehicle;
