use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PendingMaintenanceRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(PendingMaintenanceRecord::Id))
                    .col(integer(PendingMaintenanceRecord::CarId))
                    .col(string_len(PendingMaintenanceRecord::MaintenanceType, 50))
                    .col(text_null(PendingMaintenanceRecord::Description))
                    .col(decimal_len_null(PendingMaintenanceRecord::Cost, 10, 2))
                    .col(timestamp_with_time_zone(PendingMaintenanceRecord::Date))
                    .col(timestamp_with_time_zone_null(PendingMaintenanceRecord::NextDate))
                    .col(string_len_null(PendingMaintenanceRecord::Mechanic, 100))
                    .col(string_len(PendingMaintenanceRecord::Status, 20))
                    .col(text_null(PendingMaintenanceRecord::Notes))
                    .col(integer_null(PendingMaintenanceRecord::Mileage))
                    .col(text_null(PendingMaintenanceRecord::Receipt))
                    .col(integer(PendingMaintenanceRecord::RequestedBy))
                    .col(
                        timestamp_with_time_zone(PendingMaintenanceRecord::RequestedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        string_len(PendingMaintenanceRecord::ApprovalStatus, 20)
                            .default("PENDING"),
                    )
                    .col(integer_null(PendingMaintenanceRecord::ApprovedBy))
                    .col(timestamp_with_time_zone_null(PendingMaintenanceRecord::ApprovedAt))
                    .col(text_null(PendingMaintenanceRecord::RejectionReason))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(PendingMaintenanceRecord::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
pub enum PendingMaintenanceRecord {
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
    RequestedBy,
    RequestedAt,
    ApprovalStatus,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
}
