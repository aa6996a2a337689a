//! Admin account data repository for database operations.

use chrono::Utc;
use entity::sea_orm_active_enums::{AdminRole, AdminStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, Condition,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::admin::{Admin, UpdateAdminParams};

/// Fields of a new admin account; the password is already hashed.
pub struct NewAdmin {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: AdminRole,
}

/// Repository providing database operations for admin accounts.
pub struct AdminRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AdminRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an ACTIVE admin account.
    pub async fn create(&self, new: NewAdmin) -> Result<Admin, DbErr> {
        let now = Utc::now();

        let entity = entity::admin::ActiveModel {
            first_name: ActiveValue::Set(new.first_name),
            last_name: ActiveValue::Set(new.last_name),
            username: ActiveValue::Set(new.username),
            email: ActiveValue::Set(new.email),
            password_hash: ActiveValue::Set(new.password_hash),
            role: ActiveValue::Set(new.role),
            status: ActiveValue::Set(AdminStatus::Active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Admin::from_entity(entity))
    }

    /// Gets an admin by ID
    ///
    /// # Returns
    /// - `Ok(Some(Admin))`: Admin found
    /// - `Ok(None)`: No admin with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Admin>, DbErr> {
        let entity = entity::prelude::Admin::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Admin::from_entity))
    }

    /// Finds an admin whose username or email equals `identifier`.
    pub async fn find_by_username_or_email(&self, identifier: &str) -> Result<Option<Admin>, DbErr> {
        let entity = entity::prelude::Admin::find()
            .filter(
                Condition::any()
                    .add(entity::admin::Column::Username.eq(identifier))
                    .add(entity::admin::Column::Email.eq(identifier)),
            )
            .one(self.db)
            .await?;

        Ok(entity.map(Admin::from_entity))
    }

    /// Gets every admin account, active or not, ordered by ID.
    pub async fn get_all(&self) -> Result<Vec<Admin>, DbErr> {
        let entities = entity::prelude::Admin::find()
            .order_by_asc(entity::admin::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Admin::from_entity).collect())
    }

    /// Checks if any admin account exists. Used for first-admin bootstrap.
    pub async fn any_exists(&self) -> Result<bool, DbErr> {
        Ok(entity::prelude::Admin::find().count(self.db).await? > 0)
    }

    /// Counts admins whose status is `ACTIVE`.
    ///
    /// Used to refuse deactivating the last active admin.
    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::Admin::find()
            .filter(entity::admin::Column::Status.eq(AdminStatus::Active))
            .count(self.db)
            .await
    }

    /// Checks whether another admin already uses the username.
    pub async fn username_taken(&self, username: &str, excluding: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Admin::find().filter(entity::admin::Column::Username.eq(username));
        if let Some(id) = excluding {
            query = query.filter(entity::admin::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Checks whether another admin already uses the email.
    pub async fn email_taken(&self, email: &str, excluding: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Admin::find().filter(entity::admin::Column::Email.eq(email));
        if let Some(id) = excluding {
            query = query.filter(entity::admin::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Applies a partial profile update.
    ///
    /// # Returns
    /// - `Ok(None)` - No admin with that id
    pub async fn update_profile(
        &self,
        id: i32,
        params: UpdateAdminParams,
    ) -> Result<Option<Admin>, DbErr> {
        let Some(existing) = entity::prelude::Admin::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::admin::ActiveModel = existing.into();
        if let Some(first_name) = params.first_name {
            active.first_name = ActiveValue::Set(first_name);
        }
        if let Some(last_name) = params.last_name {
            active.last_name = ActiveValue::Set(last_name);
        }
        if let Some(username) = params.username {
            active.username = ActiveValue::Set(username);
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Admin::from_entity(entity)))
    }

    /// # Returns
    /// - `Ok(false)` - No admin with that id
    pub async fn set_status(&self, id: i32, status: AdminStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::Admin::update_many()
            .filter(entity::admin::Column::Id.eq(id))
            .col_expr(entity::admin::Column::Status, Expr::value(status))
            .col_expr(entity::admin::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Replaces an admin's password hash.
    ///
    /// # Arguments
    /// - `id`: Admin ID
    /// - `password_hash`: bcrypt hash of the new password
    ///
    /// # Returns
    /// - `Ok(true)`: Password updated
    /// - `Ok(false)`: No admin with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn update_password(&self, id: i32, password_hash: String) -> Result<bool, DbErr> {
        let result = entity::prelude::Admin::update_many()
            .filter(entity::admin::Column::Id.eq(id))
            .col_expr(entity::admin::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(entity::admin::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
