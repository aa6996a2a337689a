use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::ApprovalStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "pending_maintenance_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub car_id: i32,
    pub maintenance_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub cost: Option<Decimal>,
    pub date: DateTimeUtc,
    pub next_date: Option<DateTimeUtc>,
    pub mechanic: Option<String>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub mileage: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub receipt: Option<String>,
    pub requested_by: i32,
    pub requested_at: DateTimeUtc,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
