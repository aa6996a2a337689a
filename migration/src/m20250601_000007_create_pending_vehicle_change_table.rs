use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PendingVehicleChange::Table)
                    .if_not_exists()
                    .col(pk_auto(PendingVehicleChange::Id))
                    .col(string_len(PendingVehicleChange::ChangeType, 10))
                    .col(text_null(PendingVehicleChange::VehicleData))
                    .col(integer_null(PendingVehicleChange::VehicleId))
                    .col(integer(PendingVehicleChange::RequestedBy))
                    .col(
                        timestamp_with_time_zone(PendingVehicleChange::RequestedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_len(PendingVehicleChange::Status, 20).default("PENDING"))
                    .col(integer_null(PendingVehicleChange::ApprovedBy))
                    .col(timestamp_with_time_zone_null(PendingVehicleChange::ApprovedAt))
                    .col(text_null(PendingVehicleChange::RejectionReason))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PendingVehicleChange::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PendingVehicleChange {
    Table,
    Id,
    ChangeType,
    VehicleData,
    VehicleId,
    RequestedBy,
    RequestedAt,
    Status,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
}
