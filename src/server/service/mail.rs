//! Outbound transactional email.
//!
//! Messages are built from a fixed catalogue on [`Email`] and delivered through a
//! [`MailTransport`]. When a mail API is configured the [`HttpMailer`] posts messages
//! to it; otherwise the [`LogMailer`] writes them to the log so local setups can still
//! read verification codes.

use std::{future::Future, sync::Arc, time::Duration};

use serde::Serialize;

use crate::server::{config::MailConfig, error::AppError, model::reservation::Reservation};

const SUBJECT_SUFFIX: &str = "- Ronaldo's Rentals";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// A rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Email {
    fn new(to: &str, subject: &str, body: String) -> Self {
        Self {
            to: to.to_string(),
            subject: format!("{} {}", subject, SUBJECT_SUFFIX),
            body,
        }
    }

    pub fn verification_code(to: &str, code: &str) -> Self {
        Self::new(
            to,
            "Email Verification",
            format!(
                "Your verification code is: {}\n\nThis code expires in 10 minutes.",
                code
            ),
        )
    }

    pub fn registration_approved(to: &str, name: &str) -> Self {
        Self::new(
            to,
            "Account Approved",
            format!(
                "Dear {},\n\nYour account has been approved. You can now log in and book vehicles.",
                name
            ),
        )
    }

    pub fn registration_rejected(to: &str, name: &str) -> Self {
        Self::new(
            to,
            "Account Application Update",
            format!(
                "Dear {},\n\nWe are unable to approve your account application at this time.",
                name
            ),
        )
    }

    pub fn password_reset(to: &str, code: &str) -> Self {
        Self::new(
            to,
            "Password Reset",
            format!(
                "Your password reset code is: {}\n\nThis code expires in 10 minutes. \
                 If you did not request a reset you can ignore this email.",
                code
            ),
        )
    }

    pub fn reservation_confirmed(to: &str, name: &str, vehicle: &str, reservation: &Reservation) -> Self {
        Self::new(
            to,
            "Reservation Confirmed",
            format!(
                "Dear {},\n\nReservation #{} is confirmed.\n\nVehicle: {}\nPickup: {}\nReturn: {}\nTotal: ${:.2}",
                name,
                reservation.id,
                vehicle,
                reservation.rental_date,
                reservation.return_date,
                reservation.total_price
            ),
        )
    }

    pub fn reservation_cancelled(to: &str, name: &str, vehicle: &str, reservation: &Reservation) -> Self {
        Self::new(
            to,
            "Reservation Cancelled",
            format!(
                "Dear {},\n\nReservation #{} for {} ({} to {}) has been cancelled.",
                name, reservation.id, vehicle, reservation.rental_date, reservation.return_date
            ),
        )
    }

    pub fn admin_credentials(to: &str, name: &str, username: &str, password: &str) -> Self {
        Self::new(
            to,
            "Admin Account Created",
            format!(
                "Dear {},\n\nAn admin account has been created for you.\n\nUsername: {}\nPassword: {}\n\n\
                 Please change your password after your first login.",
                name, username, password
            ),
        )
    }
}

/// Delivery backend for rendered messages.
pub trait MailTransport: Send + Sync {
    fn send(&self, email: &Email) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Serialize)]
struct MailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Posts messages as JSON to an HTTP mail API using a bearer key.
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(SEND_TIMEOUT).build()?;

        Ok(Self { client, config })
    }
}

impl MailTransport for HttpMailer {
    async fn send(&self, email: &Email) -> Result<(), AppError> {
        self.client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&MailRequest {
                from: &self.config.from,
                to: &email.to,
                subject: &email.subject,
                text: &email.body,
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

/// Writes messages to the log instead of delivering them.
#[derive(Clone, Copy, Default)]
pub struct LogMailer;

impl MailTransport for LogMailer {
    async fn send(&self, email: &Email) -> Result<(), AppError> {
        tracing::info!(to = %email.to, subject = %email.subject, "Mail delivery disabled, message logged");
        tracing::debug!("{}", email.body);
        Ok(())
    }
}

/// Mail transport selected at startup and shared through `AppState`.
#[derive(Clone)]
pub enum Mailer {
    Http(Arc<HttpMailer>),
    Log(LogMailer),
}

impl Mailer {
    /// Builds the HTTP transport when a mail API is configured, the log transport otherwise.
    pub fn from_config(config: Option<MailConfig>) -> Result<Self, AppError> {
        match config {
            Some(config) => Ok(Self::Http(Arc::new(HttpMailer::new(config)?))),
            None => Ok(Self::Log(LogMailer)),
        }
    }

    /// Sends a message and waits for the transport to accept it.
    pub async fn send(&self, email: &Email) -> Result<(), AppError> {
        match self {
            Self::Http(mailer) => mailer.send(email).await,
            Self::Log(mailer) => mailer.send(email).await,
        }
    }

    /// Sends a message in the background.
    ///
    /// Used after a transaction commits; delivery failures are logged and never reach
    /// the caller.
    pub fn dispatch(&self, email: Email) {
        let mailer = self.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&email).await {
                tracing::error!(to = %email.to, "Failed to send \"{}\": {}", email.subject, e);
            }
        });
    }
}

impl Default for Mailer {
    fn default() -> Self {
        Self::Log(LogMailer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the shared subject suffix across the catalogue.
    ///
    /// Expected: every subject ends with the business name
    #[test]
    fn subjects_carry_business_name() {
        let emails = [
            Email::verification_code("a@gmail.com", "123456"),
            Email::registration_approved("a@gmail.com", "Jane Doe"),
            Email::registration_rejected("a@gmail.com", "Jane Doe"),
            Email::password_reset("a@gmail.com", "654321"),
            Email::admin_credentials("a@gmail.com", "Sam Lee", "sam", "secret"),
        ];

        for email in emails {
            assert!(email.subject.ends_with("- Ronaldo's Rentals"), "{}", email.subject);
            assert_eq!(email.to, "a@gmail.com");
        }
    }

    /// Tests that the code appears in the verification message body.
    ///
    /// Expected: body contains the code
    #[test]
    fn verification_body_contains_code() {
        let email = Email::verification_code("a@gmail.com", "482913");
        assert_eq!(email.subject, "Email Verification - Ronaldo's Rentals");
        assert!(email.body.contains("482913"));
    }

    /// Tests that the log transport never fails.
    ///
    /// Expected: Ok
    #[tokio::test]
    async fn log_mailer_accepts_messages() {
        let mailer = Mailer::from_config(None).unwrap();
        assert!(matches!(mailer, Mailer::Log(_)));
        assert!(mailer
            .send(&Email::password_reset("a@gmail.com", "000111"))
            .await
            .is_ok());
    }
}
