//! Pending vehicle change factory.
//!
//! The payload is written as raw JSON text so tests can stage both well-formed and
//! malformed drafts.

use chrono::Utc;
use entity::sea_orm_active_enums::{ApprovalStatus, ChangeType};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::{license_plate_for, next_id, vin_for};

/// Returns a well-formed JSON vehicle draft with a unique plate and VIN.
pub fn vehicle_draft_json() -> String {
    let id = next_id();
    serde_json::json!({
        "make": "Honda",
        "model": "Civic",
        "vehicleType": "Sedan",
        "year": 2023,
        "color": "Blue",
        "licensePlate": license_plate_for(id),
        "vin": vin_for(id),
        "fuelType": "Petrol",
        "transmission": "Manual",
        "seatingCapacity": 5,
        "mileage": 500,
        "pricePerDay": "45.00",
        "location": "Airport",
        "description": null,
        "features": null
    })
    .to_string()
}

/// Factory for staged vehicle changes, defaulting to a PENDING ADD.
pub struct PendingVehicleChangeFactory<'a> {
    db: &'a DatabaseConnection,
    change_type: ChangeType,
    vehicle_data: Option<String>,
    vehicle_id: Option<i32>,
    requested_by: i32,
    status: ApprovalStatus,
}

impl<'a> PendingVehicleChangeFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, requested_by: i32) -> Self {
        Self {
            db,
            change_type: ChangeType::Add,
            vehicle_data: Some(vehicle_draft_json()),
            vehicle_id: None,
            requested_by,
            status: ApprovalStatus::Pending,
        }
    }

    /// Stages a removal of the given vehicle instead of an addition.
    pub fn remove(mut self, vehicle_id: i32) -> Self {
        self.change_type = ChangeType::Remove;
        self.vehicle_data = None;
        self.vehicle_id = Some(vehicle_id);
        self
    }

    pub fn vehicle_data(mut self, data: Option<String>) -> Self {
        self.vehicle_data = data;
        self
    }

    pub fn status(mut self, status: ApprovalStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::pending_vehicle_change::Model, DbErr> {
        entity::pending_vehicle_change::ActiveModel {
            change_type: ActiveValue::Set(self.change_type),
            vehicle_data: ActiveValue::Set(self.vehicle_data),
            vehicle_id: ActiveValue::Set(self.vehicle_id),
            requested_by: ActiveValue::Set(self.requested_by),
            requested_at: ActiveValue::Set(Utc::now()),
            status: ActiveValue::Set(self.status),
            approved_by: ActiveValue::Set(None),
            approved_at: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
