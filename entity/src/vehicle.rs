use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::VehicleStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub make: String,
    pub model: String,
    pub vehicle_type: String,
    pub year: i32,
    pub color: String,
    #[sea_orm(unique)]
    pub license_plate: String,
    #[sea_orm(unique)]
    pub vin: Option<String>,
    pub fuel_type: String,
    pub transmission: String,
    pub seating_capacity: i32,
    pub mileage: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price_per_day: Decimal,
    pub location: String,
    pub status: VehicleStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub features: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_image_1: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_image_2: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub vehicle_image_3: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
    #[sea_orm(has_many = "super::maintenance_record::Entity")]
    MaintenanceRecord,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<super::maintenance_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
