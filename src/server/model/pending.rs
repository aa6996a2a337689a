//! Staged changes awaiting super-admin approval.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{ApprovalStatus, ChangeType};
use sea_orm::ActiveEnum;

use crate::{
    model::pending::PendingVehicleChangeDto,
    server::{error::AppError, model::vehicle::VehicleDraft},
};

/// The mutation a pending vehicle request will apply once approved.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleChange {
    Add(VehicleDraft),
    Remove { vehicle_id: i32 },
    Update { vehicle_id: i32, draft: VehicleDraft },
}

impl VehicleChange {
    pub fn change_type(&self) -> ChangeType {
        match self {
            VehicleChange::Add(_) => ChangeType::Add,
            VehicleChange::Remove { .. } => ChangeType::Remove,
            VehicleChange::Update { .. } => ChangeType::Update,
        }
    }

    pub fn vehicle_id(&self) -> Option<i32> {
        match self {
            VehicleChange::Add(_) => None,
            VehicleChange::Remove { vehicle_id } | VehicleChange::Update { vehicle_id, .. } => {
                Some(*vehicle_id)
            }
        }
    }

    pub fn draft(&self) -> Option<&VehicleDraft> {
        match self {
            VehicleChange::Add(draft) | VehicleChange::Update { draft, .. } => Some(draft),
            VehicleChange::Remove { .. } => None,
        }
    }

    /// Rebuilds the change from its stored columns.
    ///
    /// # Returns
    /// - `Err(AppError::InternalError)` - A required column is missing for the change type
    /// - `Err(AppError::SerdeErr)` - The stored draft is not valid JSON
    pub fn from_columns(
        change_type: ChangeType,
        vehicle_data: Option<&str>,
        vehicle_id: Option<i32>,
    ) -> Result<Self, AppError> {
        let missing = |column: &str| {
            AppError::InternalError(format!(
                "Pending {} change is missing {}",
                change_type.to_value(),
                column
            ))
        };

        Ok(match change_type {
            ChangeType::Add => {
                let data = vehicle_data.ok_or_else(|| missing("vehicle_data"))?;
                VehicleChange::Add(VehicleDraft::from_json(data)?)
            }
            ChangeType::Remove => VehicleChange::Remove {
                vehicle_id: vehicle_id.ok_or_else(|| missing("vehicle_id"))?,
            },
            ChangeType::Update => {
                let data = vehicle_data.ok_or_else(|| missing("vehicle_data"))?;
                VehicleChange::Update {
                    vehicle_id: vehicle_id.ok_or_else(|| missing("vehicle_id"))?,
                    draft: VehicleDraft::from_json(data)?,
                }
            }
        })
    }
}

/// Review outcome shared by both approval queues.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingVehicleChange {
    pub id: i32,
    pub change_type: ChangeType,
    /// Raw stored draft, kept as-is so malformed rows can still be listed.
    pub vehicle_data: Option<String>,
    pub vehicle_id: Option<i32>,
    pub requested_by: i32,
    pub requested_at: DateTime<Utc>,
    pub status: ApprovalStatus,
    pub review: Review,
}

impl PendingVehicleChange {
    pub fn from_entity(entity: entity::pending_vehicle_change::Model) -> Self {
        Self {
            id: entity.id,
            change_type: entity.change_type,
            vehicle_data: entity.vehicle_data,
            vehicle_id: entity.vehicle_id,
            requested_by: entity.requested_by,
            requested_at: entity.requested_at,
            status: entity.status,
            review: Review {
                approved_by: entity.approved_by,
                approved_at: entity.approved_at,
                rejection_reason: entity.rejection_reason,
            },
        }
    }

    pub fn change(&self) -> Result<VehicleChange, AppError> {
        VehicleChange::from_columns(
            self.change_type,
            self.vehicle_data.as_deref(),
            self.vehicle_id,
        )
    }

    pub fn into_dto(self) -> PendingVehicleChangeDto {
        let vehicle_data = self
            .vehicle_data
            .as_deref()
            .and_then(|data| serde_json::from_str(data).ok());

        PendingVehicleChangeDto {
            id: self.id,
            change_type: self.change_type.to_value(),
            vehicle_data,
            vehicle_id: self.vehicle_id,
            requested_by: self.requested_by,
            requested_at: self.requested_at,
            status: self.status.to_value(),
            approved_by: self.review.approved_by,
            approved_at: self.review.approved_at,
            rejection_reason: self.review.rejection_reason,
        }
    }
}

/// Optional free-text reason attached to a rejection.
pub fn rejection_reason(reason: Option<String>) -> Option<String> {
    reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_requires_vehicle_id() {
        let result = VehicleChange::from_columns(ChangeType::Remove, None, None);
        assert!(matches!(result, Err(AppError::InternalError(_))));

        let change = VehicleChange::from_columns(ChangeType::Remove, None, Some(9)).unwrap();
        assert_eq!(change, VehicleChange::Remove { vehicle_id: 9 });
        assert_eq!(change.change_type(), ChangeType::Remove);
    }

    #[test]
    fn malformed_draft_is_serde_error() {
        let result = VehicleChange::from_columns(ChangeType::Add, Some("{not json"), None);
        assert!(matches!(result, Err(AppError::SerdeErr(_))));
    }
}
