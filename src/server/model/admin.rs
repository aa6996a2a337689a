//! Admin account domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{AdminRole, AdminStatus};
use sea_orm::ActiveEnum;

use crate::{
    model::admin::{AdminDto, CreateAdminDto, UpdateAdminDto},
    server::error::AppError,
};

pub const MIN_ADMIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Admin {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub status: AdminStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    pub fn from_entity(entity: entity::admin::Model) -> Self {
        Self {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            role: entity.role,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Password hash is never included.
    pub fn into_dto(self) -> AdminDto {
        AdminDto {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            email: self.email,
            role: self.role.to_value(),
            status: self.status.to_value(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AdminStatus::Active
    }
}

/// Validated input for creating an admin account.
#[derive(Debug, Clone)]
pub struct CreateAdminParams {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateAdminParams {
    pub fn from_dto(dto: CreateAdminDto) -> Result<Self, AppError> {
        let username = dto.username.trim().to_string();
        let email = dto.email.trim().to_string();

        if username.is_empty() {
            return Err(AppError::bad_request("Username is required"));
        }
        if email.is_empty() {
            return Err(AppError::bad_request("Email is required"));
        }
        if dto.password.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(
                "Password must be at least 6 characters",
            ));
        }

        Ok(Self {
            first_name: dto.first_name.trim().to_string(),
            last_name: dto.last_name.trim().to_string(),
            username,
            email,
            password: dto.password,
        })
    }
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateAdminParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UpdateAdminParams {
    pub fn from_dto(dto: UpdateAdminDto) -> Self {
        let clean = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            first_name: clean(dto.first_name),
            last_name: clean(dto.last_name),
            username: clean(dto.username),
            email: clean(dto.email),
        }
    }
}
