//! Customer sign-up requests and their review by admins.

use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        registration_request::{NewRegistrationRequest, RegistrationRequestRepository},
        user::UserRepository,
    },
    error::AppError,
    model::user::{RegistrationForm, RegistrationRequest, User},
    service::mail::{Email, Mailer},
    util::password::hash_password,
};

pub struct RegistrationService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
}

impl<'a> RegistrationService<'a> {
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer) -> Self {
        Self { db, mailer }
    }

    /// Stores a validated sign-up as a `PENDING` request.
    ///
    /// # Returns
    /// - `Ok(RegistrationRequest)` - Request awaiting admin review
    /// - `Err(AppError::BadRequest)` - A field failed validation
    /// - `Err(AppError::Conflict)` - Email or license already registered or pending
    pub async fn submit(&self, form: RegistrationForm) -> Result<RegistrationRequest, AppError> {
        form.validate()?;

        let user_repo = UserRepository::new(self.db);
        let request_repo = RegistrationRequestRepository::new(self.db);

        if user_repo.email_exists(&form.email).await? {
            return Err(AppError::conflict("Email already exists"));
        }
        if user_repo.license_exists(&form.drivers_license_number).await? {
            return Err(AppError::conflict(
                "Driver's license number already exists",
            ));
        }
        if request_repo.pending_email_exists(&form.email).await? {
            return Err(AppError::conflict("Email already has a pending request"));
        }
        if request_repo
            .pending_license_exists(&form.drivers_license_number)
            .await?
        {
            return Err(AppError::conflict(
                "Driver's license number already has a pending request",
            ));
        }

        let password_hash = hash_password(&form.password)?;
        let request = request_repo
            .create(NewRegistrationRequest {
                first_name: form.first_name,
                last_name: form.last_name,
                phone_number: form.phone_number,
                email: form.email,
                password_hash,
                drivers_license_number: form.drivers_license_number,
                drivers_license_image: form.drivers_license_image,
            })
            .await?;

        tracing::info!("Registration request {} submitted", request.id);

        Ok(request)
    }

    /// Lists registration requests awaiting review.
    pub async fn pending(&self) -> Result<Vec<RegistrationRequest>, AppError> {
        Ok(RegistrationRequestRepository::new(self.db)
            .get_pending()
            .await?)
    }

    /// Approves a pending request and creates the customer account.
    ///
    /// The status flip and the account insert commit together. The approval email is
    /// sent after commit.
    ///
    /// # Returns
    /// - `Ok(User)` - The new customer account
    /// - `Err(AppError::NotFound)` - No request with this id
    /// - `Err(AppError::Conflict)` - Request already processed, or the email was
    ///   registered in the meantime
    pub async fn approve(&self, id: i32) -> Result<User, AppError> {
        let txn = self.db.begin().await?;
        let request_repo = RegistrationRequestRepository::new(&txn);
        let user_repo = UserRepository::new(&txn);

        let Some(request) = request_repo.find_by_id(id).await? else {
            return Err(AppError::not_found("Registration request not found"));
        };

        if !request_repo
            .resolve_if_pending(id, ApprovalStatus::Approved)
            .await?
        {
            return Err(AppError::conflict("Request already processed"));
        }

        if user_repo.email_exists(&request.email).await? {
            return Err(AppError::conflict("Email already exists"));
        }

        let user = user_repo.create_from_request(&request).await?;
        txn.commit().await?;

        tracing::info!("Registration request {} approved as user {}", id, user.id);
        self.mailer
            .dispatch(Email::registration_approved(&user.email, &user.full_name()));

        Ok(user)
    }

    /// Rejects a pending request. No account is created.
    pub async fn reject(&self, id: i32) -> Result<RegistrationRequest, AppError> {
        let request_repo = RegistrationRequestRepository::new(self.db);

        let Some(request) = request_repo.find_by_id(id).await? else {
            return Err(AppError::not_found("Registration request not found"));
        };

        if !request_repo
            .resolve_if_pending(id, ApprovalStatus::Rejected)
            .await?
        {
            return Err(AppError::conflict("Request already processed"));
        }

        tracing::info!("Registration request {} rejected", id);
        self.mailer.dispatch(Email::registration_rejected(
            &request.email,
            &request.full_name(),
        ));

        Ok(RegistrationRequest {
            status: ApprovalStatus::Rejected,
            ..request
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory};

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Maria".to_string(),
            last_name: "Lopez".to_string(),
            phone_number: "5557654".to_string(),
            email: "maria@gmail.com".to_string(),
            password: "Password1!".to_string(),
            drivers_license_number: "7654321".to_string(),
            drivers_license_image: None,
        }
    }

    fn conflict_message<T: std::fmt::Debug>(result: Result<T, AppError>) -> String {
        match result {
            Err(AppError::Conflict(msg)) => msg,
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    /// Tests that a valid sign-up is stored as pending with a hashed password.
    ///
    /// Expected: PENDING request whose hash is not the raw password
    #[tokio::test]
    async fn submit_stores_pending_request() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let request = RegistrationService::new(db, &mailer).submit(form()).await?;

        assert_eq!(request.status, ApprovalStatus::Pending);
        assert_ne!(request.password_hash, "Password1!");
        assert!(bcrypt::verify("Password1!", &request.password_hash).unwrap());

        Ok(())
    }

    /// Tests duplicate detection against customers and pending requests.
    ///
    /// Expected: Conflict naming the duplicated field
    #[tokio::test]
    async fn submit_rejects_duplicates() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();
        let service = RegistrationService::new(db, &mailer);

        factory::user::UserFactory::new(db)
            .email("taken@gmail.com")
            .drivers_license_number("1111111")
            .build()
            .await?;
        service.submit(form()).await?;

        let mut dup_email = form();
        dup_email.email = "taken@gmail.com".to_string();
        dup_email.drivers_license_number = "2222222".to_string();
        assert_eq!(
            conflict_message(service.submit(dup_email).await),
            "Email already exists"
        );

        let mut dup_license = form();
        dup_license.email = "other@gmail.com".to_string();
        dup_license.drivers_license_number = "1111111".to_string();
        assert_eq!(
            conflict_message(service.submit(dup_license).await),
            "Driver's license number already exists"
        );

        let mut pending_email = form();
        pending_email.drivers_license_number = "3333333".to_string();
        assert_eq!(
            conflict_message(service.submit(pending_email).await),
            "Email already has a pending request"
        );

        let mut pending_license = form();
        pending_license.email = "fresh@gmail.com".to_string();
        assert_eq!(
            conflict_message(service.submit(pending_license).await),
            "Driver's license number already has a pending request"
        );

        Ok(())
    }

    /// Tests that invalid input is rejected before touching the database.
    ///
    /// Expected: BadRequest for a non-gmail address
    #[tokio::test]
    async fn submit_validates_form() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let mut bad = form();
        bad.email = "maria@yahoo.com".to_string();

        let result = RegistrationService::new(db, &mailer).submit(bad).await;
        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Email must end with @gmail.com"));

        Ok(())
    }

    /// Tests approval materializing exactly one customer.
    ///
    /// Expected: approved customer created, second approval is a Conflict
    #[tokio::test]
    async fn approve_creates_customer_once() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();
        let service = RegistrationService::new(db, &mailer);

        let request = factory::registration_request::create_registration_request(db).await?;

        let user = service.approve(request.id).await?;
        assert_eq!(user.email, request.email);
        assert!(user.is_approved());

        assert_eq!(
            conflict_message(service.approve(request.id).await),
            "Request already processed"
        );
        assert_eq!(
            conflict_message(service.reject(request.id).await),
            "Request already processed"
        );
        assert_eq!(UserRepository::new(db).get_customers().await?.len(), 1);

        Ok(())
    }

    /// Tests rejection leaving no customer behind.
    ///
    /// Expected: REJECTED request and no customer account
    #[tokio::test]
    async fn reject_creates_no_customer() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let request = factory::registration_request::create_registration_request(db).await?;
        let rejected = RegistrationService::new(db, &mailer)
            .reject(request.id)
            .await?;

        assert_eq!(rejected.status, ApprovalStatus::Rejected);
        assert!(UserRepository::new(db)
            .find_by_email(&request.email)
            .await?
            .is_none());

        Ok(())
    }

    /// Tests reviewing an unknown request.
    ///
    /// Expected: NotFound
    #[tokio::test]
    async fn approve_unknown_request_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_account_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let result = RegistrationService::new(db, &mailer).approve(404).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
