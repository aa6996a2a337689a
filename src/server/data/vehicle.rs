//! Vehicle data repository for database operations.

use chrono::Utc;
use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::vehicle::{Vehicle, VehicleDraft, VehicleImages, VehicleSearchParams};

/// Repository providing database operations for vehicle inventory.
pub struct VehicleRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VehicleRepository<'a, C> {
    /// Creates a new VehicleRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new vehicle with status `Available`.
    ///
    /// # Arguments
    /// - `draft` - Validated descriptive fields
    /// - `images` - Base64 photos, stored in slot order
    ///
    /// # Returns
    /// - `Ok(Vehicle)` - The created vehicle
    /// - `Err(DbErr)` - Database error, including unique plate/VIN violations
    pub async fn create(&self, draft: VehicleDraft, images: VehicleImages) -> Result<Vehicle, DbErr> {
        let now = Utc::now();
        let [image_1, image_2, image_3] = images.0;

        let entity = entity::vehicle::ActiveModel {
            make: ActiveValue::Set(draft.make),
            model: ActiveValue::Set(draft.model),
            vehicle_type: ActiveValue::Set(draft.vehicle_type),
            year: ActiveValue::Set(draft.year),
            color: ActiveValue::Set(draft.color),
            license_plate: ActiveValue::Set(draft.license_plate),
            vin: ActiveValue::Set(draft.vin),
            fuel_type: ActiveValue::Set(draft.fuel_type),
            transmission: ActiveValue::Set(draft.transmission),
            seating_capacity: ActiveValue::Set(draft.seating_capacity),
            mileage: ActiveValue::Set(draft.mileage),
            price_per_day: ActiveValue::Set(draft.price_per_day),
            location: ActiveValue::Set(draft.location),
            status: ActiveValue::Set(VehicleStatus::Available),
            description: ActiveValue::Set(draft.description),
            features: ActiveValue::Set(draft.features),
            vehicle_image_1: ActiveValue::Set(image_1),
            vehicle_image_2: ActiveValue::Set(image_2),
            vehicle_image_3: ActiveValue::Set(image_3),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Vehicle::from_entity(entity))
    }

    /// Gets a vehicle by ID
    ///
    /// # Returns
    /// - `Ok(Some(Vehicle))`: Vehicle found
    /// - `Ok(None)`: No vehicle with this ID
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, DbErr> {
        let entity = entity::prelude::Vehicle::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Vehicle::from_entity))
    }

    /// Gets every vehicle ordered by id.
    pub async fn get_all(&self) -> Result<Vec<Vehicle>, DbErr> {
        let entities = entity::prelude::Vehicle::find()
            .order_by_asc(entity::vehicle::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Vehicle::from_entity).collect())
    }

    /// Gets every vehicle in one status, ordered by ID.
    ///
    /// # Arguments
    /// - `status`: Status to filter on
    ///
    /// # Returns
    /// - `Ok(Vec<Vehicle>)`: Matching vehicles
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_status(&self, status: VehicleStatus) -> Result<Vec<Vehicle>, DbErr> {
        let entities = entity::prelude::Vehicle::find()
            .filter(entity::vehicle::Column::Status.eq(status))
            .order_by_asc(entity::vehicle::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Vehicle::from_entity).collect())
    }

    /// Filters vehicles by status and any of the optional search criteria.
    ///
    /// Location and type match exactly; price bounds are inclusive.
    pub async fn search(&self, params: VehicleSearchParams) -> Result<Vec<Vehicle>, DbErr> {
        let mut query = entity::prelude::Vehicle::find()
            .filter(entity::vehicle::Column::Status.eq(params.status));

        if let Some(location) = params.location {
            query = query.filter(entity::vehicle::Column::Location.eq(location));
        }
        if let Some(vehicle_type) = params.vehicle_type {
            query = query.filter(entity::vehicle::Column::VehicleType.eq(vehicle_type));
        }
        if let Some(min_price) = params.min_price {
            query = query.filter(entity::vehicle::Column::PricePerDay.gte(min_price));
        }
        if let Some(max_price) = params.max_price {
            query = query.filter(entity::vehicle::Column::PricePerDay.lte(max_price));
        }

        let entities = query
            .order_by_asc(entity::vehicle::Column::PricePerDay)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Vehicle::from_entity).collect())
    }

    /// Distinct locations across the whole fleet, sorted.
    pub async fn distinct_locations(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::Vehicle::find()
            .select_only()
            .column(entity::vehicle::Column::Location)
            .distinct()
            .order_by_asc(entity::vehicle::Column::Location)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Distinct vehicle types across the whole fleet, sorted.
    pub async fn distinct_types(&self) -> Result<Vec<String>, DbErr> {
        entity::prelude::Vehicle::find()
            .select_only()
            .column(entity::vehicle::Column::VehicleType)
            .distinct()
            .order_by_asc(entity::vehicle::Column::VehicleType)
            .into_tuple::<String>()
            .all(self.db)
            .await
    }

    /// Checks whether another vehicle already uses the license plate.
    ///
    /// # Arguments
    /// - `plate` - Normalized license plate
    /// - `excluding` - Vehicle id to ignore, used when updating that vehicle
    pub async fn license_plate_taken(
        &self,
        plate: &str,
        excluding: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::Vehicle::find()
            .filter(entity::vehicle::Column::LicensePlate.eq(plate));
        if let Some(id) = excluding {
            query = query.filter(entity::vehicle::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Checks whether another vehicle already uses the VIN.
    pub async fn vin_taken(&self, vin: &str, excluding: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Vehicle::find().filter(entity::vehicle::Column::Vin.eq(vin));
        if let Some(id) = excluding {
            query = query.filter(entity::vehicle::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Overwrites the descriptive fields of a vehicle.
    ///
    /// Status and stored images are left untouched.
    ///
    /// # Returns
    /// - `Ok(Some(Vehicle))` - Updated vehicle
    /// - `Ok(None)` - No vehicle with that id
    /// - `Err(DbErr)` - Database error
    pub async fn update_details(
        &self,
        id: i32,
        draft: VehicleDraft,
    ) -> Result<Option<Vehicle>, DbErr> {
        let Some(existing) = entity::prelude::Vehicle::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::vehicle::ActiveModel = existing.into();
        active.make = ActiveValue::Set(draft.make);
        active.model = ActiveValue::Set(draft.model);
        active.vehicle_type = ActiveValue::Set(draft.vehicle_type);
        active.year = ActiveValue::Set(draft.year);
        active.color = ActiveValue::Set(draft.color);
        active.license_plate = ActiveValue::Set(draft.license_plate);
        active.vin = ActiveValue::Set(draft.vin);
        active.fuel_type = ActiveValue::Set(draft.fuel_type);
        active.transmission = ActiveValue::Set(draft.transmission);
        active.seating_capacity = ActiveValue::Set(draft.seating_capacity);
        active.mileage = ActiveValue::Set(draft.mileage);
        active.price_per_day = ActiveValue::Set(draft.price_per_day);
        active.location = ActiveValue::Set(draft.location);
        active.description = ActiveValue::Set(draft.description);
        active.features = ActiveValue::Set(draft.features);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Vehicle::from_entity(entity)))
    }

    /// Sets a vehicle's status unconditionally.
    ///
    /// # Returns
    /// - `Ok(true)` - Vehicle updated
    /// - `Ok(false)` - No vehicle with that id
    pub async fn set_status(&self, id: i32, status: VehicleStatus) -> Result<bool, DbErr> {
        let result = entity::prelude::Vehicle::update_many()
            .filter(entity::vehicle::Column::Id.eq(id))
            .col_expr(entity::vehicle::Column::Status, Expr::value(status))
            .col_expr(entity::vehicle::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Flips a vehicle from `Available` to `Rented` in a single conditional update.
    ///
    /// Concurrent bookings of the same vehicle serialize on this statement; only one
    /// of them observes an affected row.
    ///
    /// # Returns
    /// - `Ok(true)` - The vehicle was available and is now rented
    /// - `Ok(false)` - The vehicle is missing or was not available
    pub async fn mark_rented_if_available(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Vehicle::update_many()
            .filter(entity::vehicle::Column::Id.eq(id))
            .filter(entity::vehicle::Column::Status.eq(VehicleStatus::Available))
            .col_expr(
                entity::vehicle::Column::Status,
                Expr::value(VehicleStatus::Rented),
            )
            .col_expr(entity::vehicle::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Deletes a vehicle row. Dependent rows must be removed first.
    ///
    /// # Returns
    /// - `Ok(true)` - Vehicle deleted
    /// - `Ok(false)` - No vehicle with that id
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Vehicle::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Counts every vehicle in the fleet.
    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Vehicle::find().count(self.db).await
    }

    /// Counts vehicles in one status
    ///
    /// # Arguments
    /// - `status`: Status to count
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of vehicles in that status
    /// - `Err(DbErr)`: Database error
    pub async fn count_by_status(&self, status: VehicleStatus) -> Result<u64, DbErr> {
        entity::prelude::Vehicle::find()
            .filter(entity::vehicle::Column::Status.eq(status))
            .count(self.db)
            .await
    }
}
