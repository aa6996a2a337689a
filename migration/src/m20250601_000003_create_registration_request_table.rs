use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RegistrationRequest::Table)
                    .if_not_exists()
                    .col(pk_auto(RegistrationRequest::Id))
                    .col(string_len(RegistrationRequest::FirstName, 100))
                    .col(string_len(RegistrationRequest::LastName, 100))
                    .col(string_len(RegistrationRequest::PhoneNumber, 20))
                    .col(string(RegistrationRequest::Email))
                    .col(string(RegistrationRequest::PasswordHash))
                    .col(string_len(RegistrationRequest::DriversLicenseNumber, 50))
                    .col(text_null(RegistrationRequest::DriversLicenseImage))
                    .col(string_len(RegistrationRequest::Status, 20))
                    .col(
                        timestamp_with_time_zone(RegistrationRequest::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(RegistrationRequest::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(RegistrationRequest::ApprovedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registration_request_email")
                    .table(RegistrationRequest::Table)
                    .col(RegistrationRequest::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegistrationRequest::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RegistrationRequest {
    Table,
    Id,
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    PasswordHash,
    DriversLicenseNumber,
    DriversLicenseImage,
    Status,
    CreatedAt,
    UpdatedAt,
    ApprovedAt,
}
