//! Signup email verification.

use crate::server::{
    error::AppError,
    service::{
        mail::{Email, Mailer},
        verification::VerificationCodeStore,
    },
    util::validation,
};

pub struct EmailVerificationService<'a> {
    codes: &'a VerificationCodeStore,
    mailer: &'a Mailer,
}

impl<'a> EmailVerificationService<'a> {
    pub fn new(codes: &'a VerificationCodeStore, mailer: &'a Mailer) -> Self {
        Self { codes, mailer }
    }

    /// Issues a fresh code and queues it for delivery. Any earlier code for the
    /// address stops working.
    ///
    /// # Returns
    /// - `Ok(())` - Code issued
    /// - `Err(AppError::BadRequest)` - Missing or non-gmail address
    pub async fn send(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::bad_request("Email is required"));
        }
        if !validation::is_gmail(email) {
            return Err(AppError::bad_request("Email must end with @gmail.com"));
        }

        let code = self.codes.issue(email).await;
        self.mailer.dispatch(Email::verification_code(email, &code));
        tracing::debug!("Verification code issued for {}", email);

        Ok(())
    }

    /// Spends a verification code.
    pub async fn verify(&self, email: &str, code: &str) -> Result<(), AppError> {
        if email.trim().is_empty() || code.trim().is_empty() {
            return Err(AppError::bad_request(
                "Email and verification code are required",
            ));
        }

        if !self.codes.verify(email, code.trim()).await {
            return Err(AppError::bad_request(
                "Invalid or expired verification code",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the full send then verify flow.
    ///
    /// Expected: the code issued by send verifies once, then fails
    #[tokio::test]
    async fn code_is_single_use() -> Result<(), AppError> {
        let codes = VerificationCodeStore::new();
        let mailer = Mailer::default();
        let service = EmailVerificationService::new(&codes, &mailer);

        service.send("driver@gmail.com").await?;
        let code = codes.outstanding("driver@gmail.com").await.unwrap();

        service.verify("driver@gmail.com", &code).await?;
        assert!(matches!(
            service.verify("driver@gmail.com", &code).await,
            Err(AppError::BadRequest(msg)) if msg == "Invalid or expired verification code"
        ));

        Ok(())
    }

    /// Tests address validation before issuing.
    ///
    /// Expected: BadRequest and no code stored
    #[tokio::test]
    async fn rejects_non_gmail_address() {
        let codes = VerificationCodeStore::new();
        let mailer = Mailer::default();
        let service = EmailVerificationService::new(&codes, &mailer);

        let result = service.send("driver@yahoo.com").await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Email must end with @gmail.com"));
        assert!(!codes.contains("driver@yahoo.com").await);

        let result = service.send("   ").await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Email is required"));
    }
}
