//! Direct maintenance record management.

use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::server::{
    data::{maintenance::MaintenanceRepository, vehicle::VehicleRepository},
    error::AppError,
    model::maintenance::{MaintenanceDraft, MaintenanceRecord},
};

pub struct MaintenanceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MaintenanceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists every maintenance record, most recent first.
    pub async fn all(&self) -> Result<Vec<MaintenanceRecord>, AppError> {
        Ok(MaintenanceRepository::new(self.db).get_all().await?)
    }

    /// Lists one vehicle's maintenance history, most recent first.
    pub async fn for_car(&self, car_id: i32) -> Result<Vec<MaintenanceRecord>, AppError> {
        Ok(MaintenanceRepository::new(self.db)
            .get_by_car(car_id)
            .await?)
    }

    /// Records completed maintenance for an existing vehicle.
    pub async fn create(&self, draft: MaintenanceDraft) -> Result<MaintenanceRecord, AppError> {
        ensure_vehicle_exists(self.db, draft.car_id).await?;

        let record = MaintenanceRepository::new(self.db)
            .create(draft, Utc::now())
            .await?;
        tracing::info!(
            "Maintenance record {} created for vehicle {}",
            record.id,
            record.draft.car_id
        );

        Ok(record)
    }

    /// Replaces a record's fields with the draft.
    ///
    /// # Returns
    /// - `Ok(MaintenanceRecord)`: The updated record
    /// - `Err(AppError::NotFound)`: Unknown record, or the draft points at an unknown vehicle
    pub async fn update(&self, id: i32, draft: MaintenanceDraft) -> Result<MaintenanceRecord, AppError> {
        ensure_vehicle_exists(self.db, draft.car_id).await?;

        MaintenanceRepository::new(self.db)
            .update(id, draft)
            .await?
            .ok_or_else(|| AppError::not_found("Maintenance record not found"))
    }

    /// Deletes a maintenance record
    ///
    /// # Returns
    /// - `Ok(())`: Record deleted
    /// - `Err(AppError::NotFound)`: No record with this ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !MaintenanceRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found("Maintenance record not found"));
        }
        Ok(())
    }
}

/// Fails with 404 `Vehicle not found` unless the vehicle exists on `db`.
pub async fn ensure_vehicle_exists<C: ConnectionTrait>(db: &C, car_id: i32) -> Result<(), AppError> {
    if VehicleRepository::new(db).find_by_id(car_id).await?.is_none() {
        return Err(AppError::not_found("Vehicle not found"));
    }
    Ok(())
}
