use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_SESSION_DAYS: i64 = 7;

/// Credentials for the HTTP mail API. Absent when mail is only logged.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub allowed_origin: String,
    pub session_days: i64,

    pub mail: Option<MailConfig>,
    pub seed_admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let session_days = match optional("SESSION_DAYS") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
                name: "SESSION_DAYS".to_string(),
                value,
            })?,
            None => DEFAULT_SESSION_DAYS,
        };

        let mail = match optional("MAIL_API_URL") {
            Some(api_url) => Some(MailConfig {
                api_url,
                api_key: required("MAIL_API_KEY")?,
                from: required("MAIL_FROM")?,
            }),
            None => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            bind_address: optional("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            allowed_origin: optional("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            session_days,
            mail,
            seed_admin_password: optional("SEED_ADMIN_PASSWORD"),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
