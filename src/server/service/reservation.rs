//! Reservation booking and cancellation.
//!
//! A booking is checked in order: the request fields, the vehicle's availability, then
//! the client's total against a server-side quote. Only then does one transaction flip
//! the vehicle to `Rented` and insert the reservation. The flip is conditional on the
//! vehicle still being `Available`, so two concurrent bookings of the same vehicle
//! cannot both succeed.

use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        reservation::ReservationRepository, user::UserRepository, vehicle::VehicleRepository,
    },
    error::AppError,
    model::reservation::{CreateReservationParams, Quote, Reservation},
    service::mail::{Email, Mailer},
};

pub struct ReservationService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
}

impl<'a> ReservationService<'a> {
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer) -> Self {
        Self { db, mailer }
    }

    /// Books a vehicle.
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Confirmed reservation; the vehicle is now `Rented`
    /// - `Err(AppError::NotFound)` - Vehicle or user does not exist
    /// - `Err(AppError::BadRequest)` - Vehicle not available or total price mismatch
    pub async fn create(&self, params: CreateReservationParams) -> Result<Reservation, AppError> {
        let Some(vehicle) = VehicleRepository::new(self.db)
            .find_by_id(params.vehicle_id)
            .await?
        else {
            return Err(AppError::not_found("Vehicle not found"));
        };

        if vehicle.status != VehicleStatus::Available {
            return Err(AppError::bad_request("Vehicle is not available"));
        }

        let quote = Quote::new(
            vehicle.price_per_day,
            params.rental_date,
            params.return_date,
            &params.amenities,
        );
        quote.check(params.total_price)?;

        let Some(user) = UserRepository::new(self.db)
            .find_by_id(params.user_id)
            .await?
        else {
            return Err(AppError::not_found("User not found"));
        };

        let txn = self.db.begin().await?;
        if !VehicleRepository::new(&txn)
            .mark_rented_if_available(vehicle.id)
            .await?
        {
            return Err(AppError::bad_request("Vehicle is not available"));
        }
        let reservation = ReservationRepository::new(&txn).create(&params).await?;
        txn.commit().await?;

        tracing::info!(
            "Reservation {} booked vehicle {} for user {} ({} days)",
            reservation.id,
            vehicle.id,
            user.id,
            quote.days
        );
        self.mailer.dispatch(Email::reservation_confirmed(
            &user.email,
            &user.full_name(),
            &format!("{} {}", vehicle.make, vehicle.model),
            &reservation,
        ));

        Ok(reservation)
    }

    /// Cancels a confirmed reservation and returns its vehicle to `Available`.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - No reservation with this id
    /// - `Err(AppError::BadRequest)` - Reservation already cancelled
    pub async fn cancel(&self, id: i32) -> Result<Reservation, AppError> {
        let txn = self.db.begin().await?;
        let reservation_repo = ReservationRepository::new(&txn);
        let vehicle_repo = VehicleRepository::new(&txn);

        let Some(reservation) = reservation_repo.find_by_id(id).await? else {
            return Err(AppError::not_found("Reservation not found"));
        };

        if !reservation_repo.cancel_if_confirmed(id).await? {
            return Err(AppError::bad_request("Reservation is already cancelled"));
        }
        vehicle_repo
            .set_status(reservation.vehicle_id, VehicleStatus::Available)
            .await?;

        let vehicle = vehicle_repo.find_by_id(reservation.vehicle_id).await?;
        let user = UserRepository::new(&txn)
            .find_by_id(reservation.user_id)
            .await?;
        let cancelled = reservation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))?;
        txn.commit().await?;

        tracing::info!("Reservation {} cancelled", id);
        if let (Some(user), Some(vehicle)) = (user, vehicle) {
            self.mailer.dispatch(Email::reservation_cancelled(
                &user.email,
                &user.full_name(),
                &format!("{} {}", vehicle.make, vehicle.model),
                &cancelled,
            ));
        }

        Ok(cancelled)
    }

    /// Gets a reservation by ID
    ///
    /// # Returns
    /// - `Ok(Reservation)`: The reservation with its amenities
    /// - `Err(AppError::NotFound)`: No reservation with this ID
    pub async fn get(&self, id: i32) -> Result<Reservation, AppError> {
        ReservationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))
    }

    /// Lists a customer's reservations, newest first.
    ///
    /// # Arguments
    /// - `user_id`: ID of the customer
    ///
    /// # Returns
    /// - `Ok(Vec<Reservation>)`: Reservations of any status, empty if none
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn for_user(&self, user_id: i32) -> Result<Vec<Reservation>, AppError> {
        Ok(ReservationRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }

    /// Lists a vehicle's reservations, newest first.
    ///
    /// # Arguments
    /// - `vehicle_id`: ID of the vehicle
    ///
    /// # Returns
    /// - `Ok(Vec<Reservation>)`: Reservations of any status, empty if none
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn for_vehicle(&self, vehicle_id: i32) -> Result<Vec<Reservation>, AppError> {
        Ok(ReservationRepository::new(self.db)
            .get_by_vehicle(vehicle_id)
            .await?)
    }

    /// Lists every reservation, newest first.
    pub async fn all(&self) -> Result<Vec<Reservation>, AppError> {
        Ok(ReservationRepository::new(self.db).get_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::reservation::AmenitySelection;
    use chrono::NaiveDate;
    use entity::sea_orm_active_enums::ReservationStatus;
    use rust_decimal::Decimal;
    use test_utils::{builder::TestBuilder, factory};

    fn params(vehicle_id: i32, user_id: i32, amenities: &[&str], total: Decimal) -> CreateReservationParams {
        let tags: Vec<String> = amenities.iter().map(|a| a.to_string()).collect();
        CreateReservationParams {
            vehicle_id,
            user_id,
            rental_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            return_date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            amenities: AmenitySelection::parse(&tags).unwrap(),
            total_price: total,
        }
    }

    /// Tests a successful booking.
    ///
    /// Three days at 50.00 plus GPS is 160.00.
    ///
    /// Expected: one confirmed reservation and the vehicle marked Rented
    #[tokio::test]
    async fn booking_rents_vehicle() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;

        let reservation = ReservationService::new(db, &mailer)
            .create(params(vehicle.id, user.id, &["gps"], Decimal::new(16000, 2)))
            .await?;

        assert_eq!(reservation.status, ReservationStatus::Confirmed);
        assert_eq!(reservation.days(), 3);

        let stored_vehicle = VehicleRepository::new(db).find_by_id(vehicle.id).await?.unwrap();
        assert_eq!(stored_vehicle.status, VehicleStatus::Rented);
        assert_eq!(
            ReservationRepository::new(db).get_by_vehicle(vehicle.id).await?.len(),
            1
        );

        Ok(())
    }

    /// Tests the price check.
    ///
    /// Expected: BadRequest with expected and received totals, nothing written
    #[tokio::test]
    async fn total_mismatch_is_rejected() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;

        let result = ReservationService::new(db, &mailer)
            .create(params(vehicle.id, user.id, &["gps"], Decimal::new(15000, 2)))
            .await;

        assert!(matches!(
            result,
            Err(AppError::BadRequest(msg))
                if msg == "Total price mismatch. Expected: 160.00, Received: 150.00"
        ));
        let stored_vehicle = VehicleRepository::new(db).find_by_id(vehicle.id).await?.unwrap();
        assert_eq!(stored_vehicle.status, VehicleStatus::Available);
        assert!(ReservationRepository::new(db).get_all().await?.is_empty());

        Ok(())
    }

    /// Tests that a total within one cent is accepted.
    ///
    /// Expected: Ok for 160.01 against a 160.00 quote
    #[tokio::test]
    async fn total_within_tolerance_is_accepted() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;

        let result = ReservationService::new(db, &mailer)
            .create(params(vehicle.id, user.id, &["gps"], Decimal::new(16001, 2)))
            .await;
        assert!(result.is_ok());

        Ok(())
    }

    /// Tests booking a vehicle that is not available.
    ///
    /// Expected: BadRequest and no change to the vehicle or reservations
    #[tokio::test]
    async fn unavailable_vehicle_is_rejected() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let user = factory::create_user(db).await?;
        let vehicle = factory::vehicle::VehicleFactory::new(db)
            .status(VehicleStatus::Maintenance)
            .build()
            .await?;

        let result = ReservationService::new(db, &mailer)
            .create(params(vehicle.id, user.id, &["none"], Decimal::new(15000, 2)))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(msg)) if msg == "Vehicle is not available"));
        let stored_vehicle = VehicleRepository::new(db).find_by_id(vehicle.id).await?.unwrap();
        assert_eq!(stored_vehicle.status, VehicleStatus::Maintenance);
        assert!(ReservationRepository::new(db).get_all().await?.is_empty());

        Ok(())
    }

    /// Tests booking the same vehicle twice.
    ///
    /// Expected: second booking fails, exactly one reservation exists
    #[tokio::test]
    async fn second_booking_of_same_vehicle_fails() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();
        let service = ReservationService::new(db, &mailer);

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;

        service
            .create(params(vehicle.id, user.id, &["none"], Decimal::new(15000, 2)))
            .await?;
        let second = service
            .create(params(vehicle.id, user.id, &["none"], Decimal::new(15000, 2)))
            .await;

        assert!(matches!(second, Err(AppError::BadRequest(_))));
        assert_eq!(service.for_vehicle(vehicle.id).await?.len(), 1);

        Ok(())
    }

    /// Tests booking a vehicle that does not exist.
    ///
    /// Expected: NotFound
    #[tokio::test]
    async fn missing_vehicle_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let user = factory::create_user(db).await?;
        let result = ReservationService::new(db, &mailer)
            .create(params(999, user.id, &["none"], Decimal::new(15000, 2)))
            .await;

        assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Vehicle not found"));

        Ok(())
    }

    /// Tests cancellation.
    ///
    /// Expected: reservation Cancelled, vehicle Available again, second cancel rejected
    #[tokio::test]
    async fn cancel_returns_vehicle_to_inventory() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();
        let service = ReservationService::new(db, &mailer);

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
        let reservation = service
            .create(params(vehicle.id, user.id, &["none"], Decimal::new(15000, 2)))
            .await?;

        let cancelled = service.cancel(reservation.id).await?;
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);

        let stored_vehicle = VehicleRepository::new(db).find_by_id(vehicle.id).await?.unwrap();
        assert_eq!(stored_vehicle.status, VehicleStatus::Available);

        let again = service.cancel(reservation.id).await;
        assert!(matches!(
            again,
            Err(AppError::BadRequest(msg)) if msg == "Reservation is already cancelled"
        ));

        Ok(())
    }

    /// Tests per-user listing.
    ///
    /// Expected: only the user's own reservations
    #[tokio::test]
    async fn for_user_filters_by_owner() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let mailer = Mailer::default();

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
        let other = factory::create_user(db).await?;
        factory::reservation::create_reservation(db, vehicle.id, user.id).await?;
        factory::reservation::create_reservation(db, vehicle.id, other.id).await?;

        let service = ReservationService::new(db, &mailer);
        let mine = service.for_user(user.id).await?;

        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].user_id, user.id);
        assert_eq!(service.all().await?.len(), 2);

        Ok(())
    }
}
