//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//!
//! Repositories are generic over `ConnectionTrait` so services can run them against either
//! the pooled connection or an open transaction.

pub mod admin;
pub mod maintenance;
pub mod pending_maintenance;
pub mod pending_vehicle_change;
pub mod registration_request;
pub mod reservation;
pub mod user;
pub mod vehicle;

#[cfg(test)]
mod test;
