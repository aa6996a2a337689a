use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::{ApprovalStatus, ChangeType};

/// Staged vehicle mutation.
///
/// `vehicle_data` holds the JSON-encoded vehicle draft for ADD and UPDATE,
/// `vehicle_id` the target for REMOVE and UPDATE.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pending_vehicle_change")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub change_type: ChangeType,
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_data: Option<String>,
    pub vehicle_id: Option<i32>,
    pub requested_by: i32,
    pub requested_at: DateTimeUtc,
    pub status: ApprovalStatus,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
