//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data (repository) layer.
//! They are responsible for:
//!
//! - **Business Logic**: Validation, pricing checks and approval workflows
//! - **Orchestration**: Coordinating repositories, outbound mail and verification codes
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Keeping multi-step changes atomic

pub mod admin;
pub mod auth;
pub mod email;
pub mod mail;
pub mod maintenance;
pub mod pending_maintenance;
pub mod pending_vehicle;
pub mod registration;
pub mod reservation;
pub mod user;
pub mod vehicle;
pub mod verification;
