//! Customer accounts: listing, removal and password reset.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{User, PASSWORD_RULE_MESSAGE},
    service::{
        mail::{Email, Mailer},
        verification::VerificationCodeStore,
    },
    util::{password::hash_password, validation},
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists approved customer accounts.
    pub async fn customers(&self) -> Result<Vec<User>, AppError> {
        Ok(UserRepository::new(self.db).get_customers().await?)
    }

    /// Deletes a customer account.
    ///
    /// # Returns
    /// - `Ok(())` - Account removed
    /// - `Err(AppError::NotFound)` - No customer with this id
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !UserRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("User not found"));
        }

        tracing::info!("User {} deleted", id);
        Ok(())
    }
}

/// Password reset by emailed code.
///
/// Reset codes live in their own [`VerificationCodeStore`] so they cannot be spent on
/// signup verification and vice versa.
pub struct PasswordResetService<'a> {
    db: &'a DatabaseConnection,
    codes: &'a VerificationCodeStore,
    mailer: &'a Mailer,
}

impl<'a> PasswordResetService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        codes: &'a VerificationCodeStore,
        mailer: &'a Mailer,
    ) -> Self {
        Self { db, codes, mailer }
    }

    /// Issues a reset code to a registered customer.
    ///
    /// # Returns
    /// - `Ok(())` - Code issued and queued for delivery
    /// - `Err(AppError::BadRequest)` - Not a gmail address
    /// - `Err(AppError::NotFound)` - No customer with this email
    pub async fn request(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::bad_request("Email is required"));
        }
        if !validation::is_gmail(email) {
            return Err(AppError::bad_request("Email must end with @gmail.com"));
        }

        if UserRepository::new(self.db)
            .find_by_email(email)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("User not found"));
        }

        let code = self.codes.issue(email).await;
        self.mailer.dispatch(Email::password_reset(email, &code));

        Ok(())
    }

    /// Confirms a reset code without spending it.
    pub async fn verify(&self, email: &str, code: &str) -> Result<(), AppError> {
        if !self.codes.check(email, code).await {
            return Err(AppError::bad_request("Invalid or expired reset code"));
        }
        Ok(())
    }

    /// Sets a new password, spending the reset code.
    ///
    /// The password rule is checked first so a weak password does not burn the code.
    pub async fn reset(&self, email: &str, code: &str, new_password: &str) -> Result<(), AppError> {
        if !validation::is_strong_password(new_password) {
            return Err(AppError::bad_request(PASSWORD_RULE_MESSAGE));
        }

        let email = email.trim();
        let user_repo = UserRepository::new(self.db);
        let Some(user) = user_repo.find_by_email(email).await? else {
            return Err(AppError::not_found("User not found"));
        };

        if !self.codes.verify(email, code).await {
            return Err(AppError::bad_request("Invalid or expired reset code"));
        }

        user_repo
            .update_password(user.id, hash_password(new_password)?)
            .await?;
        tracing::info!("Password reset for user {}", user.id);

        Ok(())
    }
}
