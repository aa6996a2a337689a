use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_len(User::FirstName, 100))
                    .col(string_len(User::LastName, 100))
                    .col(string_len(User::PhoneNumber, 20))
                    .col(string_uniq(User::Email))
                    .col(string(User::PasswordHash))
                    .col(string_len_uniq(User::DriversLicenseNumber, 50))
                    .col(text_null(User::DriversLicenseImage))
                    .col(string_len(User::Role, 50))
                    .col(string_len(User::Status, 20))
                    .col(boolean(User::Approved).default(false))
                    .col(boolean(User::EmailVerified).default(false))
                    .col(timestamp_with_time_zone(User::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(User::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    FirstName,
    LastName,
    PhoneNumber,
    Email,
    PasswordHash,
    DriversLicenseNumber,
    DriversLicenseImage,
    Role,
    Status,
    Approved,
    EmailVerified,
    CreatedAt,
    UpdatedAt,
}
