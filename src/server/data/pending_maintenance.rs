//! Pending maintenance request data repository for database operations.

use chrono::Utc;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::maintenance::{MaintenanceDraft, PendingMaintenance};

pub struct PendingMaintenanceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PendingMaintenanceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stages a maintenance event as `PENDING`.
    pub async fn create(
        &self,
        draft: MaintenanceDraft,
        requested_by: i32,
    ) -> Result<PendingMaintenance, DbErr> {
        let entity = entity::pending_maintenance_record::ActiveModel {
            car_id: ActiveValue::Set(draft.car_id),
            maintenance_type: ActiveValue::Set(draft.maintenance_type),
            description: ActiveValue::Set(draft.description),
            cost: ActiveValue::Set(draft.cost),
            date: ActiveValue::Set(draft.date),
            next_date: ActiveValue::Set(draft.next_date),
            mechanic: ActiveValue::Set(draft.mechanic),
            status: ActiveValue::Set(draft.status),
            notes: ActiveValue::Set(draft.notes),
            mileage: ActiveValue::Set(draft.mileage),
            receipt: ActiveValue::Set(draft.receipt),
            requested_by: ActiveValue::Set(requested_by),
            requested_at: ActiveValue::Set(Utc::now()),
            approval_status: ActiveValue::Set(ApprovalStatus::Pending),
            approved_by: ActiveValue::Set(None),
            approved_at: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PendingMaintenance::from_entity(entity))
    }

    /// Gets a staged maintenance request by ID, whatever its status.
    ///
    /// # Returns
    /// - `Ok(Some(PendingMaintenance))`: Request found
    /// - `Ok(None)`: No request with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<PendingMaintenance>, DbErr> {
        let entity = entity::prelude::PendingMaintenanceRecord::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(PendingMaintenance::from_entity))
    }

    /// Gets requests still awaiting review, oldest first.
    pub async fn get_pending(&self) -> Result<Vec<PendingMaintenance>, DbErr> {
        let entities = entity::prelude::PendingMaintenanceRecord::find()
            .filter(
                entity::pending_maintenance_record::Column::ApprovalStatus
                    .eq(ApprovalStatus::Pending),
            )
            .order_by_asc(entity::pending_maintenance_record::Column::RequestedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(PendingMaintenance::from_entity)
            .collect())
    }

    /// Records the review outcome if the request is still `PENDING`.
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
        let result = entity::prelude::PendingMaintenanceRecord::update_many()
            .filter(entity::pending_maintenance_record::Column::Id.eq(id))
            .filter(
                entity::pending_maintenance_record::Column::ApprovalStatus
                    .eq(ApprovalStatus::Pending),
            )
            .col_expr(
                entity::pending_maintenance_record::Column::ApprovalStatus,
                Expr::value(status),
            )
            .col_expr(
                entity::pending_maintenance_record::Column::ApprovedBy,
                Expr::value(Some(reviewer)),
            )
            .col_expr(
                entity::pending_maintenance_record::Column::ApprovedAt,
                Expr::value(Some(Utc::now())),
            )
            .col_expr(
                entity::pending_maintenance_record::Column::RejectionReason,
                Expr::value(reason),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
