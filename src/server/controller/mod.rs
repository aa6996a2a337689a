//! HTTP request handlers.
//!
//! Controllers check access with `AuthGuard`, convert DTOs into validated
//! parameters, call a service and convert the result back into a DTO.

pub mod admin;
pub mod auth;
pub mod email;
pub mod health;
pub mod maintenance;
pub mod pending_vehicle;
pub mod reservation;
pub mod vehicle;
