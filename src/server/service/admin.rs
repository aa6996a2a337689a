//! Admin account management.
//!
//! Covers first-admin bootstrap, super-admin provisioning of further admins, profile
//! and status changes, and the startup seed account. At least one ACTIVE admin must
//! remain at all times.

use entity::sea_orm_active_enums::{AdminRole, AdminStatus};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::admin::{AdminRepository, NewAdmin},
    error::AppError,
    model::admin::{Admin, CreateAdminParams, UpdateAdminParams, MIN_ADMIN_PASSWORD_LENGTH},
    service::mail::{Email, Mailer},
    util::password::{hash_password, verify_password},
};

const SEED_ADMIN_USERNAME: &str = "manager";
const SEED_ADMIN_EMAIL: &str = "manager@ronaldosrentals.com";

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer) -> Self {
        Self { db, mailer }
    }

    /// Whether no admin account exists yet.
    pub async fn is_first_admin(&self) -> Result<bool, AppError> {
        Ok(!AdminRepository::new(self.db).any_exists().await?)
    }

    /// Creates the very first admin as a `SUPER_ADMIN`.
    ///
    /// # Returns
    /// - `Ok(Admin)` - The new super admin
    /// - `Err(AppError::Forbidden)` - An admin already exists
    pub async fn register_first(&self, params: CreateAdminParams) -> Result<Admin, AppError> {
        if !self.is_first_admin().await? {
            return Err(AppError::Forbidden(
                "Admin registration is closed; ask a super admin to add your account".to_string(),
            ));
        }

        let admin = self.create(params, AdminRole::SuperAdmin).await?;
        tracing::info!("First admin {} registered as super admin", admin.username);

        Ok(admin)
    }

    /// Creates an `ADMIN` account and emails its credentials.
    pub async fn add_admin(&self, params: CreateAdminParams) -> Result<Admin, AppError> {
        let password = params.password.clone();
        let admin = self.create(params, AdminRole::Admin).await?;

        tracing::info!("Admin {} added", admin.username);
        self.mailer.dispatch(Email::admin_credentials(
            &admin.email,
            &format!("{} {}", admin.first_name, admin.last_name),
            &admin.username,
            &password,
        ));

        Ok(admin)
    }

    async fn create(&self, params: CreateAdminParams, role: AdminRole) -> Result<Admin, AppError> {
        let admin_repo = AdminRepository::new(self.db);

        if admin_repo.email_taken(&params.email, None).await? {
            return Err(AppError::conflict("Email already exists"));
        }
        if admin_repo.username_taken(&params.username, None).await? {
            return Err(AppError::conflict("Username already exists"));
        }

        let password_hash = hash_password(&params.password)?;
        let admin = admin_repo
            .create(NewAdmin {
                first_name: params.first_name,
                last_name: params.last_name,
                username: params.username,
                email: params.email,
                password_hash,
                role,
            })
            .await?;

        Ok(admin)
    }

    /// Lists every admin account.
    pub async fn list(&self) -> Result<Vec<Admin>, AppError> {
        Ok(AdminRepository::new(self.db).get_all().await?)
    }

    /// Gets an admin by ID
    ///
    /// # Returns
    /// - `Ok(Admin)`: The admin
    /// - `Err(AppError::NotFound)`: No admin with this ID
    pub async fn get(&self, id: i32) -> Result<Admin, AppError> {
        AdminRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))
    }

    /// Updates names, username or email; omitted fields are kept.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - New username or email belongs to another admin
    /// - `Err(AppError::NotFound)` - No admin with this id
    pub async fn update(&self, id: i32, params: UpdateAdminParams) -> Result<Admin, AppError> {
        let admin_repo = AdminRepository::new(self.db);

        if let Some(email) = &params.email {
            if admin_repo.email_taken(email, Some(id)).await? {
                return Err(AppError::conflict("Email already exists"));
            }
        }
        if let Some(username) = &params.username {
            if admin_repo.username_taken(username, Some(id)).await? {
                return Err(AppError::conflict("Username already exists"));
            }
        }

        admin_repo
            .update_profile(id, params)
            .await?
            .ok_or_else(|| AppError::not_found("Admin not found"))
    }

    /// Marks an admin INACTIVE unless it is the last active one.
    ///
    /// The active count and the status change run in one transaction.
    pub async fn deactivate(&self, id: i32) -> Result<Admin, AppError> {
        let txn = self.db.begin().await?;
        let admin_repo = AdminRepository::new(&txn);

        let Some(admin) = admin_repo.find_by_id(id).await? else {
            return Err(AppError::not_found("Admin not found"));
        };

        if admin.is_active() && admin_repo.count_active().await? <= 1 {
            return Err(AppError::bad_request(
                "Cannot deactivate the last admin account",
            ));
        }

        admin_repo.set_status(id, AdminStatus::Inactive).await?;
        txn.commit().await?;

        tracing::info!("Admin {} deactivated", admin.username);

        Ok(Admin {
            status: AdminStatus::Inactive,
            ..admin
        })
    }

    /// Re-enables a deactivated admin account.
    ///
    /// # Returns
    /// - `Ok(Admin)`: The admin, now `ACTIVE`
    /// - `Err(AppError::NotFound)`: No admin with this ID
    pub async fn activate(&self, id: i32) -> Result<Admin, AppError> {
        let admin_repo = AdminRepository::new(self.db);

        if !admin_repo.set_status(id, AdminStatus::Active).await? {
            return Err(AppError::not_found("Admin not found"));
        }

        self.get(id).await
    }

    /// Replaces an admin's password after checking the current one.
    pub async fn change_password(
        &self,
        id: i32,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if new_password.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(
                "New password must be at least 6 characters",
            ));
        }

        let admin = self.get(id).await?;
        if !verify_password(current_password, &admin.password_hash)? {
            return Err(AppError::bad_request("Current password is incorrect"));
        }

        AdminRepository::new(self.db)
            .update_password(id, hash_password(new_password)?)
            .await?;

        Ok(())
    }

    /// Creates the `manager` super admin when no admin exists and a seed password is
    /// configured.
    ///
    /// # Returns
    /// - `Ok(Some(Admin))` - Seed account created
    /// - `Ok(None)` - Admins already exist or no seed password configured
    pub async fn seed(&self, password: Option<&str>) -> Result<Option<Admin>, AppError> {
        let Some(password) = password else {
            return Ok(None);
        };
        if !self.is_first_admin().await? {
            return Ok(None);
        }

        let admin = self
            .create(
                CreateAdminParams {
                    first_name: "System".to_string(),
                    last_name: "Manager".to_string(),
                    username: SEED_ADMIN_USERNAME.to_string(),
                    email: SEED_ADMIN_EMAIL.to_string(),
                    password: password.to_string(),
                },
                AdminRole::SuperAdmin,
            )
            .await?;

        tracing::info!(
            "Seeded super admin '{}' ({}); change its password after first login",
            admin.username,
            admin.email
        );

        Ok(Some(admin))
    }
}
