//! Rental backend API and business logic.
//!
//! The backend uses Axum as the web framework, SeaORM for database operations and
//! tower-sessions for cookie sessions persisted in the same Sqlite database.
//!
//! # Architecture
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business rules: approval workflows, pricing, verification codes, mail
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session principal storage and authorization guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, mailer, code stores)
//! - **Startup** (`startup`) - Initialization of database, sessions, CORS, mailer and seed admin
//! - **Router** (`router`) - Axum route configuration, `doc` holds the OpenAPI document
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** loads the session principal and checks roles
//! 3. **Controller** converts DTOs to params, calls service
//! 4. **Service** executes business logic, often inside a transaction
//! 5. **Data** queries database, converts entities to domain models
//! 6. **Controller** converts domain model to DTO, returns HTTP response

pub mod config;
pub mod controller;
pub mod data;
pub mod doc;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
