//! Maintenance events staged by admins for super-admin approval.
//!
//! Approval copies the staged fields into a permanent record stamped as completed now.

use chrono::Utc;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{maintenance::MaintenanceRepository, pending_maintenance::PendingMaintenanceRepository},
    error::AppError,
    model::{
        account::Principal,
        maintenance::{MaintenanceDraft, MaintenanceRecord, PendingMaintenance},
        pending::rejection_reason,
    },
    service::maintenance::ensure_vehicle_exists,
};

pub struct PendingMaintenanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PendingMaintenanceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stages a maintenance event.
    ///
    /// # Returns
    /// - `Err(AppError::Forbidden)` - Submitter is a super admin
    /// - `Err(AppError::NotFound)` - The vehicle does not exist
    pub async fn submit(
        &self,
        principal: Principal,
        draft: MaintenanceDraft,
    ) -> Result<PendingMaintenance, AppError> {
        if principal.is_super_admin() {
            return Err(AppError::Forbidden(
                "Super admins should use direct add endpoint".to_string(),
            ));
        }

        ensure_vehicle_exists(self.db, draft.car_id).await?;

        let pending = PendingMaintenanceRepository::new(self.db)
            .create(draft, principal.id)
            .await?;
        tracing::info!(
            "Admin {} staged maintenance request {}",
            principal.id,
            pending.id
        );

        Ok(pending)
    }

    /// Lists staged maintenance awaiting review, oldest first.
    pub async fn pending(&self) -> Result<Vec<PendingMaintenance>, AppError> {
        Ok(PendingMaintenanceRepository::new(self.db)
            .get_pending()
            .await?)
    }

    /// Approves a staged event and materializes the maintenance record.
    ///
    /// # Returns
    /// - `Ok(MaintenanceRecord)` - The new permanent record
    /// - `Err(AppError::NotFound)` - No such request, or its vehicle is gone
    /// - `Err(AppError::Conflict)` - Request already resolved
    pub async fn approve(&self, id: i32, reviewer: i32) -> Result<MaintenanceRecord, AppError> {
        let txn = self.db.begin().await?;
        let pending_repo = PendingMaintenanceRepository::new(&txn);

        let Some(pending) = pending_repo.find_by_id(id).await? else {
            return Err(AppError::not_found("Pending request not found"));
        };

        if !pending_repo
            .resolve_if_pending(id, ApprovalStatus::Approved, reviewer, None)
            .await?
        {
            return Err(AppError::conflict("Request is not in pending status"));
        }

        ensure_vehicle_exists(&txn, pending.draft.car_id).await?;
        let record = MaintenanceRepository::new(&txn)
            .create(pending.draft, Utc::now())
            .await?;
        txn.commit().await?;

        tracing::info!(
            "Pending maintenance {} approved as record {}",
            id,
            record.id
        );

        Ok(record)
    }

    /// Rejects a staged event. No record is created.
    pub async fn reject(
        &self,
        id: i32,
        reviewer: i32,
        reason: Option<String>,
    ) -> Result<PendingMaintenance, AppError> {
        let pending_repo = PendingMaintenanceRepository::new(self.db);

        if pending_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Pending request not found"));
        }

        if !pending_repo
            .resolve_if_pending(id, ApprovalStatus::Rejected, reviewer, rejection_reason(reason))
            .await?
        {
            return Err(AppError::conflict("Request is not in pending status"));
        }

        pending_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pending request not found"))
    }
}
