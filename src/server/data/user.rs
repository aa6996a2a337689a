//! Customer account data repository for database operations.

use chrono::Utc;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    account::ROLE_CUSTOMER,
    user::{RegistrationRequest, User},
};

/// Repository providing database operations for approved customer accounts.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Materializes an approved customer account from a registration request.
    ///
    /// # Returns
    /// - `Ok(User)` - Account with role `ROLE_CUSTOMER` and status `APPROVED`
    /// - `Err(DbErr)` - Database error, including unique email/license violations
    pub async fn create_from_request(&self, request: &RegistrationRequest) -> Result<User, DbErr> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            first_name: ActiveValue::Set(request.first_name.clone()),
            last_name: ActiveValue::Set(request.last_name.clone()),
            phone_number: ActiveValue::Set(request.phone_number.clone()),
            email: ActiveValue::Set(request.email.clone()),
            password_hash: ActiveValue::Set(request.password_hash.clone()),
            drivers_license_number: ActiveValue::Set(request.drivers_license_number.clone()),
            drivers_license_image: ActiveValue::Set(request.drivers_license_image.clone()),
            role: ActiveValue::Set(ROLE_CUSTOMER.to_string()),
            status: ActiveValue::Set(ApprovalStatus::Approved),
            approved: ActiveValue::Set(true),
            email_verified: ActiveValue::Set(true),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Gets a customer by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Gets a customer by exact email address
    ///
    /// # Returns
    /// - `Ok(Some(User))`: Customer found
    /// - `Ok(None)`: No customer with this email
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Checks whether a customer account already uses the email.
    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether a customer account already uses the driver's license number.
    pub async fn license_exists(&self, license: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::DriversLicenseNumber.eq(license))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets all approved customers ordered by last then first name.
    pub async fn get_customers(&self) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(ROLE_CUSTOMER))
            .filter(entity::user::Column::Status.eq(ApprovalStatus::Approved))
            .order_by_asc(entity::user::Column::LastName)
            .order_by_asc(entity::user::Column::FirstName)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// # Returns
    /// - `Ok(true)` - Password replaced
    /// - `Ok(false)` - No user with that id
    pub async fn update_password(&self, id: i32, password_hash: String) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Deletes a customer by ID
    ///
    /// # Returns
    /// - `Ok(true)`: Customer deleted
    /// - `Ok(false)`: No customer with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected == 1)
    }
}
