//! Pending vehicle change data repository for database operations.

use chrono::Utc;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::pending::{PendingVehicleChange, VehicleChange},
};

pub struct PendingVehicleChangeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PendingVehicleChangeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stages a change as `PENDING`.
    ///
    /// The draft, if any, is stored as camelCase JSON.
    ///
    /// # Returns
    /// - `Err(AppError::SerdeErr)` - Draft could not be serialized
    /// - `Err(AppError::DbErr)` - Insert failed
    pub async fn create(
        &self,
        change: &VehicleChange,
        requested_by: i32,
    ) -> Result<PendingVehicleChange, AppError> {
        let vehicle_data = change.draft().map(|d| d.to_json()).transpose()?;

        let entity = entity::pending_vehicle_change::ActiveModel {
            change_type: ActiveValue::Set(change.change_type()),
            vehicle_data: ActiveValue::Set(vehicle_data),
            vehicle_id: ActiveValue::Set(change.vehicle_id()),
            requested_by: ActiveValue::Set(requested_by),
            requested_at: ActiveValue::Set(Utc::now()),
            status: ActiveValue::Set(ApprovalStatus::Pending),
            approved_by: ActiveValue::Set(None),
            approved_at: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PendingVehicleChange::from_entity(entity))
    }

    /// Gets a staged vehicle change by ID, whatever its status.
    ///
    /// # Returns
    /// - `Ok(Some(PendingVehicleChange))`: Change found
    /// - `Ok(None)`: No change with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<PendingVehicleChange>, DbErr> {
        let entity = entity::prelude::PendingVehicleChange::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(PendingVehicleChange::from_entity))
    }

    /// Gets requests still awaiting review, oldest first.
    pub async fn get_pending(&self) -> Result<Vec<PendingVehicleChange>, DbErr> {
        let entities = entity::prelude::PendingVehicleChange::find()
            .filter(entity::pending_vehicle_change::Column::Status.eq(ApprovalStatus::Pending))
            .order_by_asc(entity::pending_vehicle_change::Column::RequestedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(PendingVehicleChange::from_entity)
            .collect())
    }

    /// Records the review outcome if the request is still `PENDING`.
    ///
    /// # Arguments
    /// - `status` - `APPROVED` or `REJECTED`
    /// - `reviewer` - Id of the reviewing super admin
    /// - `reason` - Rejection reason, `None` for approvals
    ///
    /// # Returns
    /// - `Ok(true)` - The request transitioned
    /// - `Ok(false)` - Missing or already resolved; nothing was written
    pub async fn resolve_if_pending(
        &self,
        id: i32,
        status: ApprovalStatus,
        reviewer: i32,
        reason: Option<String>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::PendingVehicleChange::update_many()
            .filter(entity::pending_vehicle_change::Column::Id.eq(id))
            .filter(entity::pending_vehicle_change::Column::Status.eq(ApprovalStatus::Pending))
            .col_expr(
                entity::pending_vehicle_change::Column::Status,
                Expr::value(status),
            )
            .col_expr(
                entity::pending_vehicle_change::Column::ApprovedBy,
                Expr::value(Some(reviewer)),
            )
            .col_expr(
                entity::pending_vehicle_change::Column::ApprovedAt,
                Expr::value(Some(Utc::now())),
            )
            .col_expr(
                entity::pending_vehicle_change::Column::RejectionReason,
                Expr::value(reason),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
