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
                    .table(Reservation::Table)
                    .if_not_exists()
                    .col(pk_auto(Reservation::Id))
                    .col(integer(Reservation::VehicleId))
                    .col(integer(Reservation::UserId))
                    .col(date(Reservation::RentalDate))
                    .col(date(Reservation::ReturnDate))
                    .col(string_len(Reservation::Status, 20).default("Confirmed"))
                    .col(decimal_len(Reservation::TotalPrice, 10, 2))
                    .col(
                        timestamp_with_time_zone(Reservation::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Reservation::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_vehicle_id")
                            .from(Reservation::Table, Reservation::VehicleId)
                            .to(Vehicle::Table, Vehicle::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservation_user_id")
                    .table(Reservation::Table)
                    .col(Reservation::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reservation {
    Table,
    Id,
    VehicleId,
    UserId,
    RentalDate,
    ReturnDate,
    Status,
    TotalPrice,
    CreatedAt,
    UpdatedAt,
}
