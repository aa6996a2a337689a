//! Customer account and registration request domain models.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::ActiveEnum;

use crate::{
    model::user::{RegistrationRequestDto, UserDto},
    server::{error::AppError, util::validation},
};

/// Approved customer account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub drivers_license_number: String,
    pub drivers_license_image: Option<String>,
    pub role: String,
    pub status: ApprovalStatus,
    pub approved: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone_number: entity.phone_number,
            email: entity.email,
            password_hash: entity.password_hash,
            drivers_license_number: entity.drivers_license_number,
            drivers_license_image: entity.drivers_license_image,
            role: entity.role,
            status: entity.status,
            approved: entity.approved,
            email_verified: entity.email_verified,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            drivers_license_number: self.drivers_license_number,
            role: self.role,
            status: self.status.to_value(),
            approved: self.approved,
            email_verified: self.email_verified,
            created_at: self.created_at,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved && self.approved
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRequest {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub drivers_license_number: String,
    pub drivers_license_image: Option<String>,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl RegistrationRequest {
    pub fn from_entity(entity: entity::registration_request::Model) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone_number: entity.phone_number,
            email: entity.email,
            password_hash: entity.password_hash,
            drivers_license_number: entity.drivers_license_number,
            drivers_license_image: entity.drivers_license_image,
            status: entity.status,
            created_at: entity.created_at,
            approved_at: entity.approved_at,
        }
    }

    pub fn into_dto(self) -> RegistrationRequestDto {
        RegistrationRequestDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            email: self.email,
            drivers_license_number: self.drivers_license_number,
            has_license_image: self.drivers_license_image.is_some(),
            status: self.status.to_value(),
            created_at: self.created_at,
            approved_at: self.approved_at,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Raw registration fields as collected from the multipart form.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub drivers_license_number: String,
    /// Base64 image, already signature-checked.
    pub drivers_license_image: Option<String>,
}

impl RegistrationForm {
    /// Checks field formats in the order the registration form presents them.
    ///
    /// # Returns
    /// - `Ok(())` - All fields are well formed
    /// - `Err(AppError::BadRequest)` - The first failing rule's message
    pub fn validate(&self) -> Result<(), AppError> {
        if !validation::is_name(&self.first_name) {
            return Err(AppError::bad_request(
                "First name must contain only letters and spaces",
            ));
        }
        if !validation::is_name(&self.last_name) {
            return Err(AppError::bad_request(
                "Last name must contain only letters and spaces",
            ));
        }
        if !validation::is_phone_number(&self.phone_number) {
            return Err(AppError::bad_request(
                "Phone number must be exactly 7 digits",
            ));
        }
        if !validation::is_gmail(&self.email) {
            return Err(AppError::bad_request("Email must end with @gmail.com"));
        }
        if !validation::is_strong_password(&self.password) {
            return Err(AppError::bad_request(PASSWORD_RULE_MESSAGE));
        }
        validate_drivers_license(&self.drivers_license_number)
    }
}

pub const PASSWORD_RULE_MESSAGE: &str = "Password must be at least 8 characters, including uppercase, lowercase, number, and special character";

pub fn validate_drivers_license(license: &str) -> Result<(), AppError> {
    if license.trim().is_empty() {
        return Err(AppError::bad_request("Driver's license number is required"));
    }
    if !validation::is_drivers_license(license) {
        return Err(AppError::bad_request(
            "Driver's license number must be exactly 7 digits",
        ));
    }
    Ok(())
}
