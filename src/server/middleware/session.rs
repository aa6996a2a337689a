//! Type-safe session management wrappers.
//!
//! The session stores only the authenticated principal. Everything else about the
//! account is reloaded per request by `AuthGuard`.

use tower_sessions::Session;

use crate::server::{error::AppError, model::account::Principal};

const SESSION_AUTH_PRINCIPAL: &str = "auth:principal";

/// Authentication session management.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Establishes a logged-in session.
    ///
    /// The session ID is rotated first so a pre-login cookie cannot be reused.
    ///
    /// # Returns
    /// - `Ok(())` - Principal stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write to the session store
    pub async fn login(&self, principal: Principal) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_AUTH_PRINCIPAL, principal)
            .await?;
        Ok(())
    }

    /// Retrieves the principal, if any.
    pub async fn principal(&self) -> Result<Option<Principal>, AppError> {
        Ok(self.session.get::<Principal>(SESSION_AUTH_PRINCIPAL).await?)
    }

    /// Destroys the session, both server-side data and the cookie.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.flush().await?;
        Ok(())
    }
}
