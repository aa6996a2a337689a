use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance_record")]
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
    pub completed_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::vehicle::Entity",
        from = "Column::CarId",
        to = "super::vehicle::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Vehicle,
}

impl Related<super::vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
