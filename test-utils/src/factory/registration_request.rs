//! Registration request factory.

use chrono::Utc;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::{hash_password, next_id, DEFAULT_PASSWORD};

/// Factory for staged customer sign-ups, defaulting to `PENDING`.
pub struct RegistrationRequestFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    drivers_license_number: String,
    status: ApprovalStatus,
}

impl<'a> RegistrationRequestFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("applicant{}@gmail.com", id),
            drivers_license_number: format!("{:07}", (id + 5_000_000) % 10_000_000),
            status: ApprovalStatus::Pending,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn drivers_license_number(mut self, number: impl Into<String>) -> Self {
        self.drivers_license_number = number.into();
        self
    }

    pub fn status(mut self, status: ApprovalStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::registration_request::Model, DbErr> {
        let now = Utc::now();
        entity::registration_request::ActiveModel {
            first_name: ActiveValue::Set("Jane".to_string()),
            last_name: ActiveValue::Set("Doe".to_string()),
            phone_number: ActiveValue::Set("5559876".to_string()),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(hash_password(DEFAULT_PASSWORD)),
            drivers_license_number: ActiveValue::Set(self.drivers_license_number),
            drivers_license_image: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            approved_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending registration request with default values.
pub async fn create_registration_request(
    db: &DatabaseConnection,
) -> Result<entity::registration_request::Model, DbErr> {
    RegistrationRequestFactory::new(db).build().await
}
