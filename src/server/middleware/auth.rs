use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{admin::AdminRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::account::{Account, Principal, Role},
};

pub enum Permission {
    /// Any admin, including super admins.
    Admin,
    SuperAdmin,
    Customer,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the session's account and checks every listed permission.
    ///
    /// The account is reloaded on each call, so deactivated admins and deleted
    /// customers lose access immediately. An empty list only requires a valid login.
    pub async fn require(&self, permissions: &[Permission]) -> Result<Account, AppError> {
        let Some(principal) = AuthSession::new(self.session).principal().await? else {
            return Err(AuthError::NotAuthenticated.into());
        };

        let account = self.load(principal).await?;
        let current = account.principal();

        for permission in permissions {
            let (allowed, what) = match permission {
                Permission::Admin => (current.role.is_admin(), "admin"),
                Permission::SuperAdmin => (current.is_super_admin(), "super admin"),
                Permission::Customer => (current.role == Role::Customer, "customer"),
            };

            if !allowed {
                return Err(AuthError::AccessDenied(
                    current.id,
                    format!("Endpoint requires {} role", what),
                )
                .into());
            }
        }

        Ok(account)
    }

    async fn load(&self, principal: Principal) -> Result<Account, AppError> {
        let account = if principal.role.is_admin() {
            AdminRepository::new(self.db)
                .find_by_id(principal.id)
                .await?
                .map(Account::Admin)
        } else {
            UserRepository::new(self.db)
                .find_by_id(principal.id)
                .await?
                .map(Account::Customer)
        };

        match account {
            Some(account) if account.is_enabled() => Ok(account),
            _ => Err(AuthError::AccountNotFound(principal.id).into()),
        }
    }
}
