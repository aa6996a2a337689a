use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicle::Table)
                    .if_not_exists()
                    .col(pk_auto(Vehicle::Id))
                    .col(string_len(Vehicle::Make, 50))
                    .col(string_len(Vehicle::Model, 50))
                    .col(string_len(Vehicle::VehicleType, 50))
                    .col(integer(Vehicle::Year))
                    .col(string_len(Vehicle::Color, 30))
                    .col(string_len_uniq(Vehicle::LicensePlate, 20))
                    .col(string_len_null(Vehicle::Vin, 17).unique_key())
                    .col(string_len(Vehicle::FuelType, 20))
                    .col(string_len(Vehicle::Transmission, 20))
                    .col(integer(Vehicle::SeatingCapacity))
                    .col(integer_null(Vehicle::Mileage))
                    .col(decimal_len(Vehicle::PricePerDay, 10, 2))
                    .col(string_len(Vehicle::Location, 100))
                    .col(string_len(Vehicle::Status, 20).default("Available"))
                    .col(text_null(Vehicle::Description))
                    .col(text_null(Vehicle::Features))
                    .col(text_null(Vehicle::VehicleImage1))
                    .col(text_null(Vehicle::VehicleImage2))
                    .col(text_null(Vehicle::VehicleImage3))
                    .col(timestamp_with_time_zone(Vehicle::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Vehicle::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicle::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Vehicle {
    Table,
    Id,
    Make,
    Model,
    VehicleType,
    Year,
    Color,
    LicensePlate,
    Vin,
    FuelType,
    Transmission,
    SeatingCapacity,
    Mileage,
    PricePerDay,
    Location,
    Status,
    Description,
    Features,
    #[sea_orm(iden = "vehicle_image_1")]
    VehicleImage1,
    #[sea_orm(iden = "vehicle_image_2")]
    VehicleImage2,
    #[sea_orm(iden = "vehicle_image_3")]
    VehicleImage3,
    CreatedAt,
    UpdatedAt,
}
