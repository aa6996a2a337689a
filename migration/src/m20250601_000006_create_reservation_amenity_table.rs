use sea_orm_migration::{prelude::*, schema::*};

use super::m20250601_000005_create_reservation_table::Reservation;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReservationAmenity::Table)
                    .if_not_exists()
                    .col(pk_auto(ReservationAmenity::Id))
                    .col(integer(ReservationAmenity::ReservationId))
                    .col(string_len(ReservationAmenity::Amenity, 20))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservation_amenity_reservation_id")
                            .from(ReservationAmenity::Table, ReservationAmenity::ReservationId)
                            .to(Reservation::Table, Reservation::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReservationAmenity::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ReservationAmenity {
    Table,
    Id,
    ReservationId,
    Amenity,
}
