//! User factory for creating approved customer accounts.

use chrono::Utc;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::{hash_password, next_id, DEFAULT_PASSWORD};

/// Factory for creating customer accounts.
///
/// Defaults:
/// - email: `customer{id}@gmail.com`
/// - drivers_license_number: the id zero-padded to 7 digits
/// - status: `APPROVED`, approved: `true`
/// - password: [`DEFAULT_PASSWORD`]
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    email: String,
    drivers_license_number: String,
    password: String,
    status: ApprovalStatus,
}

impl<'a> UserFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            email: format!("customer{}@gmail.com", id),
            drivers_license_number: format!("{:07}", id % 10_000_000),
            password: DEFAULT_PASSWORD.to_string(),
            status: ApprovalStatus::Approved,
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

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn status(mut self, status: ApprovalStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds and inserts the user entity into the database.
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let now = Utc::now();
        entity::user::ActiveModel {
            first_name: ActiveValue::Set("Test".to_string()),
            last_name: ActiveValue::Set("Customer".to_string()),
            phone_number: ActiveValue::Set("5551234".to_string()),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(hash_password(&self.password)),
            drivers_license_number: ActiveValue::Set(self.drivers_license_number),
            drivers_license_image: ActiveValue::Set(None),
            role: ActiveValue::Set("ROLE_CUSTOMER".to_string()),
            approved: ActiveValue::Set(self.status == ApprovalStatus::Approved),
            status: ActiveValue::Set(self.status),
            email_verified: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an approved customer with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_approved_customer() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(User).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let user = create_user(db).await?;

        assert_eq!(user.role, "ROLE_CUSTOMER");
        assert_eq!(user.status, ApprovalStatus::Approved);
        assert!(user.approved);
        assert_eq!(user.drivers_license_number.len(), 7);

        Ok(())
    }
}
