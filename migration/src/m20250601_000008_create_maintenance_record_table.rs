use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000004_create_vehicle_table::Vehicle;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MaintenanceRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(MaintenanceRecord::Id))
                    .col(integer(MaintenanceRecord::CarId))
                    .col(string_len(MaintenanceRecord::MaintenanceType, 50))
                    .col(text_null(MaintenanceRecord::Description))
                    .col(decimal_len_null(MaintenanceRecord::Cost, 10, 2))
                    .col(timestamp_with_time_zone(MaintenanceRecord::Date))
                    .col(timestamp_with_time_zone_null(MaintenanceRecord::NextDate))
                    .col(string_len_null(MaintenanceRecord::Mechanic, 100))
                    .col(string_len(MaintenanceRecord::Status, 20))
                    .col(text_null(MaintenanceRecord::Notes))
                    .col(integer_null(MaintenanceRecord::Mileage))
                    .col(text_null(MaintenanceRecord::Receipt))
                    .col(
                        timestamp_with_time_zone(MaintenanceRecord::CompletedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_record_car_id")
                            .from(MaintenanceRecord::Table, MaintenanceRecord::CarId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MaintenanceRecord {
    Table,
    Id,
    CarId,
    MaintenanceType,
    Description,
    Cost,
    Date,
    NextDate,
    Mechanic,
    Status,
    Notes,
    Mileage,
    Receipt,
    CompletedAt,
}
