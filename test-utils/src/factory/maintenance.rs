//! Maintenance record factories, permanent and pending.

use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::ApprovalStatus;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a completed oil-change record for the given vehicle.
pub async fn create_maintenance_record(
    db: &DatabaseConnection,
    car_id: i32,
) -> Result<entity::maintenance_record::Model, DbErr> {
    let date = Utc::now() - Duration::days(2);
    entity::maintenance_record::ActiveModel {
        car_id: ActiveValue::Set(car_id),
        maintenance_type: ActiveValue::Set("Routine Service".to_string()),
        description: ActiveValue::Set(Some("Oil change".to_string())),
        cost: ActiveValue::Set(Some(Decimal::new(8999, 2))),
        date: ActiveValue::Set(date),
        next_date: ActiveValue::Set(Some(date + Duration::days(90))),
        mechanic: ActiveValue::Set(Some("Sam".to_string())),
        status: ActiveValue::Set("Completed".to_string()),
        notes: ActiveValue::Set(None),
        mileage: ActiveValue::Set(Some(15000)),
        receipt: ActiveValue::Set(None),
        completed_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates a pending maintenance request for the given vehicle.
pub async fn create_pending_maintenance(
    db: &DatabaseConnection,
    car_id: i32,
    requested_by: i32,
    approval_status: ApprovalStatus,
) -> Result<entity::pending_maintenance_record::Model, DbErr> {
    let date = Utc::now() - Duration::days(1);
    entity::pending_maintenance_record::ActiveModel {
        car_id: ActiveValue::Set(car_id),
        maintenance_type: ActiveValue::Set("Repair".to_string()),
        description: ActiveValue::Set(Some("Brake pads".to_string())),
        cost: ActiveValue::Set(Some(Decimal::new(25000, 2))),
        date: ActiveValue::Set(date),
        next_date: ActiveValue::Set(None),
        mechanic: ActiveValue::Set(Some("Alex".to_string())),
        status: ActiveValue::Set("Completed".to_string()),
        notes: ActiveValue::Set(None),
        mileage: ActiveValue::Set(Some(20000)),
        receipt: ActiveValue::Set(None),
        requested_by: ActiveValue::Set(requested_by),
        requested_at: ActiveValue::Set(Utc::now()),
        approval_status: ActiveValue::Set(approval_status),
        approved_by: ActiveValue::Set(None),
        approved_at: ActiveValue::Set(None),
        rejection_reason: ActiveValue::Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}
