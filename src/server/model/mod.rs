//! Domain models and operation-specific parameter types.
//!
//! Repositories convert SeaORM entities into these types at the data boundary and
//! controllers convert them into DTOs at the HTTP boundary. Parameter types carry
//! validated input from controllers into services.

pub mod account;
pub mod admin;
pub mod maintenance;
pub mod pending;
pub mod reservation;
pub mod user;
pub mod vehicle;
