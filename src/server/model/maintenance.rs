//! Maintenance record domain models.

use chrono::{DateTime, Months, Utc};
use entity::sea_orm_active_enums::ApprovalStatus;
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;

use crate::{
    model::{
        maintenance::{MaintenanceInputDto, MaintenanceRecordDto},
        pending::PendingMaintenanceDto,
    },
    server::{error::AppError, model::pending::Review},
};

pub const DEFAULT_MAINTENANCE_STATUS: &str = "Completed";

/// Validated maintenance event fields, shared by direct records and pending requests.
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceDraft {
    pub car_id: i32,
    pub maintenance_type: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: DateTime<Utc>,
    pub next_date: Option<DateTime<Utc>>,
    pub mechanic: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub mileage: Option<i32>,
    pub receipt: Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl MaintenanceDraft {
    /// Validates required fields and fills defaults.
    ///
    /// `next_date` defaults to three months after `date`; `status` defaults to
    /// `Completed`.
    pub fn from_dto(dto: MaintenanceInputDto) -> Result<Self, AppError> {
        let maintenance_type = clean(dto.maintenance_type);
        let (Some(car_id), Some(maintenance_type), Some(date)) =
            (dto.car_id, maintenance_type, dto.date)
        else {
            return Err(AppError::bad_request(
                "Car ID, type, and date are required",
            ));
        };

        if let Some(cost) = dto.cost {
            if cost < Decimal::ZERO {
                return Err(AppError::bad_request("Cost cannot be negative"));
            }
        }

        let next_date = dto
            .next_date
            .or_else(|| date.checked_add_months(Months::new(3)));

        Ok(Self {
            car_id,
            maintenance_type,
            description: clean(dto.description),
            cost: dto.cost,
            date,
            next_date,
            mechanic: clean(dto.mechanic),
            status: clean(dto.status).unwrap_or_else(|| DEFAULT_MAINTENANCE_STATUS.to_string()),
            notes: clean(dto.notes),
            mileage: dto.mileage,
            receipt: clean(dto.receipt),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceRecord {
    pub id: i32,
    pub draft: MaintenanceDraft,
    pub completed_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    pub fn from_entity(entity: entity::maintenance_record::Model) -> Self {
        Self {
            id: entity.id,
            draft: MaintenanceDraft {
                car_id: entity.car_id,
                maintenance_type: entity.maintenance_type,
                description: entity.description,
                cost: entity.cost,
                date: entity.date,
                next_date: entity.next_date,
                mechanic: entity.mechanic,
                status: entity.status,
                notes: entity.notes,
                mileage: entity.mileage,
                receipt: entity.receipt,
            },
            completed_at: entity.completed_at,
        }
    }

    pub fn into_dto(self) -> MaintenanceRecordDto {
        let d = self.draft;
        MaintenanceRecordDto {
            id: self.id,
            car_id: d.car_id,
            maintenance_type: d.maintenance_type,
            description: d.description,
            cost: d.cost.map(|c| c.round_dp(2)),
            date: d.date,
            next_date: d.next_date,
            mechanic: d.mechanic,
            status: d.status,
            notes: d.notes,
            mileage: d.mileage,
            receipt: d.receipt,
            completed_at: self.completed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingMaintenance {
    pub id: i32,
    pub draft: MaintenanceDraft,
    pub requested_by: i32,
    pub requested_at: DateTime<Utc>,
    pub approval_status: ApprovalStatus,
    pub review: Review,
}

impl PendingMaintenance {
    pub fn from_entity(entity: entity::pending_maintenance_record::Model) -> Self {
        Self {
            id: entity.id,
            draft: MaintenanceDraft {
                car_id: entity.car_id,
                maintenance_type: entity.maintenance_type,
                description: entity.description,
                cost: entity.cost,
                date: entity.date,
                next_date: entity.next_date,
                mechanic: entity.mechanic,
                status: entity.status,
                notes: entity.notes,
                mileage: entity.mileage,
                receipt: entity.receipt,
            },
            requested_by: entity.requested_by,
            requested_at: entity.requested_at,
            approval_status: entity.approval_status,
            review: Review {
                approved_by: entity.approved_by,
                approved_at: entity.approved_at,
                rejection_reason: entity.rejection_reason,
            },
        }
    }

    pub fn into_dto(self) -> PendingMaintenanceDto {
        let d = self.draft;
        PendingMaintenanceDto {
            id: self.id,
            car_id: d.car_id,
            maintenance_type: d.maintenance_type,
            description: d.description,
            cost: d.cost.map(|c| c.round_dp(2)),
            date: d.date,
            next_date: d.next_date,
            mechanic: d.mechanic,
            status: d.status,
            notes: d.notes,
            mileage: d.mileage,
            receipt: d.receipt,
            requested_by: self.requested_by,
            requested_at: self.requested_at,
            approval_status: self.approval_status.to_value(),
            approved_by: self.review.approved_by,
            approved_at: self.review.approved_at,
            rejection_reason: self.review.rejection_reason,
        }
    }
}
