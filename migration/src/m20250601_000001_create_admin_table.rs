use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(pk_auto(Admin::Id))
                    .col(string_len(Admin::FirstName, 100))
                    .col(string_len(Admin::LastName, 100))
                    .col(string_len_uniq(Admin::Username, 50))
                    .col(string_uniq(Admin::Email))
                    .col(string(Admin::PasswordHash))
                    .col(string_len(Admin::Role, 20).default("ADMIN"))
                    .col(string_len(Admin::Status, 20).default("ACTIVE"))
                    .col(timestamp_with_time_zone(Admin::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Admin::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Admin {
    Table,
    Id,
    FirstName,
    LastName,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    CreatedAt,
    UpdatedAt,
}
