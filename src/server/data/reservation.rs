//! Reservation data repository for database operations.
//!
//! A reservation is stored as one `reservation` row plus one `reservation_amenity` row
//! per selected amenity tag; this repository always reads and writes the two together.

use chrono::Utc;
use entity::sea_orm_active_enums::ReservationStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::reservation::{CreateReservationParams, Reservation};

pub struct ReservationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ReservationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a confirmed reservation and its amenity rows.
    ///
    /// Does not touch the vehicle; callers flip its status in the same transaction.
    pub async fn create(&self, params: &CreateReservationParams) -> Result<Reservation, DbErr> {
        let now = Utc::now();

        let reservation = entity::reservation::ActiveModel {
            vehicle_id: ActiveValue::Set(params.vehicle_id),
            user_id: ActiveValue::Set(params.user_id),
            rental_date: ActiveValue::Set(params.rental_date),
            return_date: ActiveValue::Set(params.return_date),
            status: ActiveValue::Set(ReservationStatus::Confirmed),
            total_price: ActiveValue::Set(params.total_price),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut amenities = Vec::with_capacity(params.amenities.amenities().len());
        for amenity in params.amenities.amenities() {
            let row = entity::reservation_amenity::ActiveModel {
                reservation_id: ActiveValue::Set(reservation.id),
                amenity: ActiveValue::Set(*amenity),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            amenities.push(row);
        }

        Ok(Reservation::from_entity(reservation, amenities))
    }

    /// Gets a reservation by ID with its amenities
    ///
    /// # Returns
    /// - `Ok(Some(Reservation))`: Reservation found
    /// - `Ok(None)`: No reservation with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, DbErr> {
        let mut found = self
            .load(entity::prelude::Reservation::find_by_id(id))
            .await?;

        Ok(found.pop())
    }

    /// Gets a customer's reservations, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Reservation>, DbErr> {
        self.load(
            entity::prelude::Reservation::find()
                .filter(entity::reservation::Column::UserId.eq(user_id))
                .order_by_desc(entity::reservation::Column::CreatedAt),
        )
        .await
    }

    /// Gets a vehicle's reservations, newest first.
    pub async fn get_by_vehicle(&self, vehicle_id: i32) -> Result<Vec<Reservation>, DbErr> {
        self.load(
            entity::prelude::Reservation::find()
                .filter(entity::reservation::Column::VehicleId.eq(vehicle_id))
                .order_by_desc(entity::reservation::Column::CreatedAt),
        )
        .await
    }

    /// Gets every reservation with its amenities, newest first.
    pub async fn get_all(&self) -> Result<Vec<Reservation>, DbErr> {
        self.load(
            entity::prelude::Reservation::find()
                .order_by_desc(entity::reservation::Column::CreatedAt),
        )
        .await
    }

    async fn load(
        &self,
        query: Select<entity::prelude::Reservation>,
    ) -> Result<Vec<Reservation>, DbErr> {
        let rows = query
            .order_by_desc(entity::reservation::Column::Id)
            .find_with_related(entity::prelude::ReservationAmenity)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(reservation, amenities)| Reservation::from_entity(reservation, amenities))
            .collect())
    }

    /// Moves a reservation from `Confirmed` to `Cancelled`.
    ///
    /// # Returns
    /// - `Ok(true)` - Reservation was confirmed and is now cancelled
    /// - `Ok(false)` - Missing or already cancelled
    pub async fn cancel_if_confirmed(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Reservation::update_many()
            .filter(entity::reservation::Column::Id.eq(id))
            .filter(entity::reservation::Column::Status.eq(ReservationStatus::Confirmed))
            .col_expr(
                entity::reservation::Column::Status,
                Expr::value(ReservationStatus::Cancelled),
            )
            .col_expr(
                entity::reservation::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Counts a vehicle's reservations that are still `CONFIRMED`.
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of confirmed reservations
    /// - `Err(DbErr)`: Database error
    pub async fn count_confirmed_for_vehicle(&self, vehicle_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::VehicleId.eq(vehicle_id))
            .filter(entity::reservation::Column::Status.eq(ReservationStatus::Confirmed))
            .count(self.db)
            .await
    }

    /// Deletes every reservation of a vehicle together with its amenity rows.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of reservations removed
    pub async fn delete_by_vehicle(&self, vehicle_id: i32) -> Result<u64, DbErr> {
        let ids: Vec<i32> = entity::prelude::Reservation::find()
            .filter(entity::reservation::Column::VehicleId.eq(vehicle_id))
            .all(self.db)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();

        if ids.is_empty() {
            return Ok(0);
        }

        entity::prelude::ReservationAmenity::delete_many()
            .filter(entity::reservation_amenity::Column::ReservationId.is_in(ids.clone()))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Reservation::delete_many()
            .filter(entity::reservation::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
