//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use sea_orm::DatabaseConnection;

use crate::server::service::{mail::Mailer, verification::VerificationCodeStore};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Mailer` holds its HTTP client behind an `Arc`
/// - `VerificationCodeStore` clones share one map
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Outbound transactional mail.
    pub mailer: Mailer,

    /// Codes issued by `/api/email/send-verification`.
    pub verification_codes: VerificationCodeStore,

    /// Codes issued by `/api/auth/request-password-reset`.
    pub reset_codes: VerificationCodeStore,
}

impl AppState {
    pub fn new(db: DatabaseConnection, mailer: Mailer) -> Self {
        Self {
            db,
            mailer,
            verification_codes: VerificationCodeStore::new(),
            reset_codes: VerificationCodeStore::new(),
        }
    }
}
