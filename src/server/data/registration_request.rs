//! Registration request data repository for database operations.

use chrono::Utc;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::RegistrationRequest;

/// Fields of a new registration request; the password is already hashed.
pub struct NewRegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password_hash: String,
    pub drivers_license_number: String,
    pub drivers_license_image: Option<String>,
}

pub struct RegistrationRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RegistrationRequestRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores a new request with status `PENDING`.
    pub async fn create(&self, new: NewRegistrationRequest) -> Result<RegistrationRequest, DbErr> {
        let now = Utc::now();

        let entity = entity::registration_request::ActiveModel {
            first_name: ActiveValue::Set(new.first_name),
            last_name: ActiveValue::Set(new.last_name),
            phone_number: ActiveValue::Set(new.phone_number),
            email: ActiveValue::Set(new.email),
            password_hash: ActiveValue::Set(new.password_hash),
            drivers_license_number: ActiveValue::Set(new.drivers_license_number),
            drivers_license_image: ActiveValue::Set(new.drivers_license_image),
            status: ActiveValue::Set(ApprovalStatus::Pending),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            approved_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(RegistrationRequest::from_entity(entity))
    }

    /// Gets a registration request by ID.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<RegistrationRequest>, DbErr> {
        let entity = entity::prelude::RegistrationRequest::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(RegistrationRequest::from_entity))
    }

    /// Gets pending requests, oldest first.
    pub async fn get_pending(&self) -> Result<Vec<RegistrationRequest>, DbErr> {
        let entities = entity::prelude::RegistrationRequest::find()
            .filter(entity::registration_request::Column::Status.eq(ApprovalStatus::Pending))
            .order_by_asc(entity::registration_request::Column::CreatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(RegistrationRequest::from_entity)
            .collect())
    }

    /// Checks whether a `PENDING` request already uses the email.
    ///
    /// Resolved requests are ignored so a rejected customer can apply again.
    pub async fn pending_email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::RegistrationRequest::find()
            .filter(entity::registration_request::Column::Email.eq(email))
            .filter(entity::registration_request::Column::Status.eq(ApprovalStatus::Pending))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks whether a `PENDING` request already uses the driver's license number.
    pub async fn pending_license_exists(&self, license: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::RegistrationRequest::find()
            .filter(entity::registration_request::Column::DriversLicenseNumber.eq(license))
            .filter(entity::registration_request::Column::Status.eq(ApprovalStatus::Pending))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Resolves a pending request.
    ///
    /// The status flip is conditional on the request still being `PENDING`, so a
    /// request can only be resolved once. `approved_at` records the decision time
    /// for both outcomes.
    ///
    /// # Returns
    /// - `Ok(true)` - Request was pending and now carries `status`
    /// - `Ok(false)` - Missing or already resolved
    pub async fn resolve_if_pending(&self, id: i32, status: ApprovalStatus) -> Result<bool, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::RegistrationRequest::update_many()
            .filter(entity::registration_request::Column::Id.eq(id))
            .filter(entity::registration_request::Column::Status.eq(ApprovalStatus::Pending))
            .col_expr(
                entity::registration_request::Column::Status,
                Expr::value(status),
            )
            .col_expr(
                entity::registration_request::Column::ApprovedAt,
                Expr::value(Some(now)),
            )
            .col_expr(
                entity::registration_request::Column::UpdatedAt,
                Expr::value(now),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
