//! Reservation factory.

use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::{Amenity, ReservationStatus};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for reservations against an existing vehicle and user.
///
/// Inserts the reservation row and one amenity row (`none` by default). The
/// vehicle status is left untouched.
pub struct ReservationFactory<'a> {
    db: &'a DatabaseConnection,
    vehicle_id: i32,
    user_id: i32,
    rental_date: NaiveDate,
    return_date: NaiveDate,
    amenities: Vec<Amenity>,
    total_price: Decimal,
    status: ReservationStatus,
}

impl<'a> ReservationFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, vehicle_id: i32, user_id: i32) -> Self {
        let rental_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
        let return_date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap_or_default();
        Self {
            db,
            vehicle_id,
            user_id,
            rental_date,
            return_date,
            amenities: vec![Amenity::None],
            total_price: Decimal::new(15000, 2),
            status: ReservationStatus::Confirmed,
        }
    }

    pub fn dates(mut self, rental_date: NaiveDate, return_date: NaiveDate) -> Self {
        self.rental_date = rental_date;
        self.return_date = return_date;
        self
    }

    pub fn amenities(mut self, amenities: Vec<Amenity>) -> Self {
        self.amenities = amenities;
        self
    }

    pub fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::reservation::Model, DbErr> {
        let now = Utc::now();
        let reservation = entity::reservation::ActiveModel {
            vehicle_id: ActiveValue::Set(self.vehicle_id),
            user_id: ActiveValue::Set(self.user_id),
            rental_date: ActiveValue::Set(self.rental_date),
            return_date: ActiveValue::Set(self.return_date),
            status: ActiveValue::Set(self.status),
            total_price: ActiveValue::Set(self.total_price),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        for amenity in self.amenities {
            entity::reservation_amenity::ActiveModel {
                reservation_id: ActiveValue::Set(reservation.id),
                amenity: ActiveValue::Set(amenity),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(reservation)
    }
}

/// Creates a confirmed reservation with default values.
pub async fn create_reservation(
    db: &DatabaseConnection,
    vehicle_id: i32,
    user_id: i32,
) -> Result<entity::reservation::Model, DbErr> {
    ReservationFactory::new(db, vehicle_id, user_id).build().await
}
