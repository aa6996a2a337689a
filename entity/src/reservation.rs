use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::ReservationStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reservation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub vehicle_id: i32,
    pub user_id: i32,
    pub rental_date: Date,
    pub return_date: Date,
    pub status: ReservationStatus,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total_price: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::VehicleId",
        to = "super::vehicle::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Vehicle,
    #[sea_orm(has_many = "super::reservation_amenity::Entity")]
    ReservationAmenity,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<super::reservation_amenity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationAmenity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
