//! Credential checks for admins and customers.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{admin::AdminRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::account::{Account, Principal},
    util::password::verify_password,
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Authenticates an admin or customer by identifier and password.
    ///
    /// The identifier is matched against admin usernames and emails first, then
    /// customer emails. Unknown identifiers, disabled accounts and wrong passwords all
    /// produce the same error.
    ///
    /// # Returns
    /// - `Ok(Principal)` - Credentials valid for an enabled account
    /// - `Err(AuthError::InvalidCredentials)` - Any credential failure
    pub async fn login(&self, identifier: &str, password: &str) -> Result<Principal, AppError> {
        if let Some(principal) = self.login_admin_account(identifier, password).await? {
            return Ok(principal);
        }

        let identifier = identifier.trim();
        if let Some(user) = UserRepository::new(self.db)
            .find_by_email(identifier)
            .await?
        {
            let account = Account::Customer(user);
            if Self::accepts(&account, password)? {
                return Ok(account.principal());
            }
        }

        Err(AuthError::InvalidCredentials.into())
    }

    /// Authenticates against admin accounts only.
    pub async fn login_admin(&self, identifier: &str, password: &str) -> Result<Principal, AppError> {
        self.login_admin_account(identifier, password)
            .await?
            .ok_or_else(|| AuthError::InvalidCredentials.into())
    }

    async fn login_admin_account(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Option<Principal>, AppError> {
        let Some(admin) = AdminRepository::new(self.db)
            .find_by_username_or_email(identifier.trim())
            .await?
        else {
            return Ok(None);
        };

        let account = Account::Admin(admin);
        if Self::accepts(&account, password)? {
            return Ok(Some(account.principal()));
        }

        Ok(None)
    }

    fn accepts(account: &Account, password: &str) -> Result<bool, AppError> {
        if !account.is_enabled() {
            return Ok(false);
        }

        let hash = match account {
            Account::Admin(admin) => &admin.password_hash,
            Account::Customer(user) => &user.password_hash,
        };

        verify_password(password, hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::account::Role;
    use entity::sea_orm_active_enums::{AdminStatus, ApprovalStatus};
    use test_utils::{
        builder::TestBuilder,
        factory::{self, helpers::DEFAULT_PASSWORD},
    };

    fn expect_invalid(result: Result<Principal, AppError>) {
        match result {
            Err(AppError::AuthErr(AuthError::InvalidCredentials)) => {}
            other => panic!("expected InvalidCredentials, got {:?}", other),
        }
    }

    /// Tests admin login by username and by email.
    ///
    /// Expected: principal carrying the admin role both ways
    #[tokio::test]
    async fn admin_logs_in_with_username_or_email() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let admin = factory::admin::AdminFactory::new(db)
            .username("fleetboss")
            .email("boss@gmail.com")
            .build()
            .await?;

        let service = AuthService::new(db);
        let by_name = service.login("fleetboss", DEFAULT_PASSWORD).await?;
        let by_email = service.login("boss@gmail.com", DEFAULT_PASSWORD).await?;

        assert_eq!(by_name, by_email);
        assert_eq!(by_name.id, admin.id);
        assert_eq!(by_name.role, Role::Admin);

        Ok(())
    }

    /// Tests customer login.
    ///
    /// Expected: customer principal
    #[tokio::test]
    async fn approved_customer_logs_in() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let user = factory::user::UserFactory::new(db)
            .email("renter@gmail.com")
            .build()
            .await?;

        let principal = AuthService::new(db)
            .login("renter@gmail.com", DEFAULT_PASSWORD)
            .await?;

        assert_eq!(principal.id, user.id);
        assert_eq!(principal.role, Role::Customer);

        Ok(())
    }

    /// Tests that every credential failure looks the same.
    ///
    /// Covers an unknown identifier, an inactive admin, a rejected customer and a
    /// wrong password.
    ///
    /// Expected: Err(AuthError::InvalidCredentials) in every case
    #[tokio::test]
    async fn failures_are_indistinguishable() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::admin::AdminFactory::new(db)
            .username("retired")
            .status(AdminStatus::Inactive)
            .build()
            .await?;
        factory::user::UserFactory::new(db)
            .email("rejected@gmail.com")
            .status(ApprovalStatus::Rejected)
            .build()
            .await?;
        factory::admin::AdminFactory::new(db)
            .username("active")
            .build()
            .await?;

        let service = AuthService::new(db);
        expect_invalid(service.login("nobody", DEFAULT_PASSWORD).await);
        expect_invalid(service.login("retired", DEFAULT_PASSWORD).await);
        expect_invalid(service.login("rejected@gmail.com", DEFAULT_PASSWORD).await);
        expect_invalid(service.login("active", "WrongPassword1!").await);

        Ok(())
    }

    /// Tests that the admin-only login ignores customer accounts.
    ///
    /// Expected: Err(AuthError::InvalidCredentials)
    #[tokio::test]
    async fn admin_login_rejects_customers() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::user::UserFactory::new(db)
            .email("renter@gmail.com")
            .build()
            .await?;

        expect_invalid(
            AuthService::new(db)
                .login_admin("renter@gmail.com", DEFAULT_PASSWORD)
                .await,
        );

        Ok(())
    }
}
