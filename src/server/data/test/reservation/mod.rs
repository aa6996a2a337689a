use crate::server::{
    data::reservation::ReservationRepository,
    model::reservation::{AmenitySelection, CreateReservationParams},
};
use chrono::NaiveDate;
use entity::sea_orm_active_enums::{Amenity, ReservationStatus};
use rust_decimal::Decimal;
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod cancel_if_confirmed;
mod create;
mod delete_by_vehicle;

fn params(vehicle_id: i32, user_id: i32, tags: &[&str]) -> CreateReservationParams {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    CreateReservationParams {
        vehicle_id,
        user_id,
        rental_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        return_date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
        amenities: AmenitySelection::parse(&tags).unwrap(),
        total_price: Decimal::new(23500, 2),
    }
}
