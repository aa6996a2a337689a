//! Admin factory for creating test admin accounts.

use chrono::Utc;
use entity::sea_orm_active_enums::{AdminRole, AdminStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::{hash_password, next_id, DEFAULT_PASSWORD};

/// Factory for creating admin accounts.
///
/// Defaults to an ACTIVE `ADMIN` with username `admin{id}`, email
/// `admin{id}@rentals.test` and password [`DEFAULT_PASSWORD`].
pub struct AdminFactory<'a> {
    db: &'a DatabaseConnection,
    username: String,
    email: String,
    password: String,
    role: AdminRole,
    status: AdminStatus,
}

impl<'a> AdminFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            username: format!("admin{}", id),
            email: format!("admin{}@rentals.test", id),
            password: DEFAULT_PASSWORD.to_string(),
            role: AdminRole::Admin,
            status: AdminStatus::Active,
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    pub fn role(mut self, role: AdminRole) -> Self {
        self.role = role;
        self
    }

    pub fn status(mut self, status: AdminStatus) -> Self {
        self.status = status;
        self
    }

    /// Builds and inserts the admin entity into the database.
    pub async fn build(self) -> Result<entity::admin::Model, DbErr> {
        let now = Utc::now();
        entity::admin::ActiveModel {
            first_name: ActiveValue::Set("Test".to_string()),
            last_name: ActiveValue::Set("Admin".to_string()),
            username: ActiveValue::Set(self.username),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(hash_password(&self.password)),
            role: ActiveValue::Set(self.role),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active `ADMIN` with default values.
pub async fn create_admin(db: &DatabaseConnection) -> Result<entity::admin::Model, DbErr> {
    AdminFactory::new(db).build().await
}

/// Creates an active `SUPER_ADMIN` with default values.
pub async fn create_super_admin(db: &DatabaseConnection) -> Result<entity::admin::Model, DbErr> {
    AdminFactory::new(db).role(AdminRole::SuperAdmin).build().await
}
