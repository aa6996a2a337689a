//! Staged vehicle changes submitted by admins and reviewed by super admins.
//!
//! Approval flips the request out of `PENDING` with a conditional update and applies
//! the change in the same transaction, so a request can only ever be applied once.

use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{pending_vehicle_change::PendingVehicleChangeRepository, vehicle::VehicleRepository},
    error::AppError,
    model::{
        account::Principal,
        pending::{rejection_reason, PendingVehicleChange, VehicleChange},
        vehicle::VehicleImages,
    },
    service::vehicle::{ensure_unique, remove_with_history},
};

pub struct PendingVehicleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PendingVehicleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stages a change for review.
    ///
    /// Drafts are checked for duplicate plates and VINs now as well as on approval.
    ///
    /// # Returns
    /// - `Ok(PendingVehicleChange)` - The staged request
    /// - `Err(AppError::Forbidden)` - Submitter is a super admin
    /// - `Err(AppError::NotFound)` - Removal or update of a missing vehicle
    /// - `Err(AppError::Conflict)` - Draft duplicates an existing plate or VIN
    pub async fn submit(
        &self,
        principal: Principal,
        change: VehicleChange,
    ) -> Result<PendingVehicleChange, AppError> {
        if principal.is_super_admin() {
            return Err(AppError::Forbidden(
                "Super admins should use direct add endpoint".to_string(),
            ));
        }

        let vehicle_repo = VehicleRepository::new(self.db);
        if let Some(vehicle_id) = change.vehicle_id() {
            if vehicle_repo.find_by_id(vehicle_id).await?.is_none() {
                return Err(AppError::not_found("Vehicle not found"));
            }
        }
        if let Some(draft) = change.draft() {
            ensure_unique(&vehicle_repo, draft, change.vehicle_id()).await?;
        }

        let pending = PendingVehicleChangeRepository::new(self.db)
            .create(&change, principal.id)
            .await?;

        tracing::info!(
            "Admin {} staged vehicle change {} ({:?})",
            principal.id,
            pending.id,
            pending.change_type
        );

        Ok(pending)
    }

    /// Lists staged vehicle changes awaiting review, oldest first.
    pub async fn pending(&self) -> Result<Vec<PendingVehicleChange>, AppError> {
        Ok(PendingVehicleChangeRepository::new(self.db)
            .get_pending()
            .await?)
    }

    /// Approves a staged change and applies it.
    ///
    /// # Returns
    /// - `Ok(PendingVehicleChange)` - The resolved request
    /// - `Err(AppError::NotFound)` - No such request, or the target vehicle is gone
    /// - `Err(AppError::Conflict)` - Request already resolved, or the draft now
    ///   duplicates another vehicle
    pub async fn approve(&self, id: i32, reviewer: i32) -> Result<PendingVehicleChange, AppError> {
        let txn = self.db.begin().await?;
        let pending_repo = PendingVehicleChangeRepository::new(&txn);
        let vehicle_repo = VehicleRepository::new(&txn);

        let Some(pending) = pending_repo.find_by_id(id).await? else {
            return Err(AppError::not_found("Pending request not found"));
        };

        if !pending_repo
            .resolve_if_pending(id, ApprovalStatus::Approved, reviewer, None)
            .await?
        {
            return Err(AppError::conflict("Request is not in pending status"));
        }

        match pending.change()? {
            VehicleChange::Add(draft) => {
                ensure_unique(&vehicle_repo, &draft, None).await?;
                let vehicle = vehicle_repo.create(draft, VehicleImages::default()).await?;
                tracing::info!("Pending change {} added vehicle {}", id, vehicle.id);
            }
            VehicleChange::Remove { vehicle_id } => {
                remove_with_history(&txn, vehicle_id).await?;
                tracing::info!("Pending change {} removed vehicle {}", id, vehicle_id);
            }
            VehicleChange::Update { vehicle_id, draft } => {
                ensure_unique(&vehicle_repo, &draft, Some(vehicle_id)).await?;
                if vehicle_repo.update_details(vehicle_id, draft).await?.is_none() {
                    return Err(AppError::not_found("Vehicle not found"));
                }
                tracing::info!("Pending change {} updated vehicle {}", id, vehicle_id);
            }
        }

        let resolved = pending_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pending request not found"))?;
        txn.commit().await?;

        Ok(resolved)
    }

    /// Rejects a staged change. Nothing is applied.
    pub async fn reject(
        &self,
        id: i32,
        reviewer: i32,
        reason: Option<String>,
    ) -> Result<PendingVehicleChange, AppError> {
        let pending_repo = PendingVehicleChangeRepository::new(self.db);

        if pending_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("Pending request not found"));
        }

        if !pending_repo
            .resolve_if_pending(id, ApprovalStatus::Rejected, reviewer, rejection_reason(reason))
            .await?
        {
            return Err(AppError::conflict("Request is not in pending status"));
        }

        tracing::info!("Pending vehicle change {} rejected by {}", id, reviewer);

        pending_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Pending request not found"))
    }
}
