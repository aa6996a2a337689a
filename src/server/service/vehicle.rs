//! Vehicle inventory: public browsing and direct super-admin edits.

use entity::sea_orm_active_enums::VehicleStatus;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        maintenance::MaintenanceRepository, reservation::ReservationRepository,
        vehicle::VehicleRepository,
    },
    error::AppError,
    model::vehicle::{
        parse_vehicle_status, Vehicle, VehicleDraft, VehicleImages, VehicleSearchParams,
        VehicleStats,
    },
};

pub struct VehicleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VehicleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists vehicles customers can book right now.
    ///
    /// # Returns
    /// - `Ok(Vec<Vehicle>)`: Vehicles with status `Available`
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn available(&self) -> Result<Vec<Vehicle>, AppError> {
        Ok(VehicleRepository::new(self.db)
            .get_by_status(VehicleStatus::Available)
            .await?)
    }

    /// Lists the whole fleet regardless of status.
    pub async fn all(&self) -> Result<Vec<Vehicle>, AppError> {
        Ok(VehicleRepository::new(self.db).get_all().await?)
    }

    /// Filters the fleet by location, type, price range and status.
    ///
    /// # Arguments
    /// - `params`: Search filters; status defaults to `Available` when omitted
    ///
    /// # Returns
    /// - `Ok(Vec<Vehicle>)`: Vehicles matching every given filter
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn search(&self, params: VehicleSearchParams) -> Result<Vec<Vehicle>, AppError> {
        Ok(VehicleRepository::new(self.db).search(params).await?)
    }

    /// Distinct pickup locations across the fleet.
    pub async fn locations(&self) -> Result<Vec<String>, AppError> {
        Ok(VehicleRepository::new(self.db).distinct_locations().await?)
    }

    /// Distinct vehicle types across the fleet.
    pub async fn types(&self) -> Result<Vec<String>, AppError> {
        Ok(VehicleRepository::new(self.db).distinct_types().await?)
    }

    /// Gets a vehicle by ID
    ///
    /// # Returns
    /// - `Ok(Vehicle)`: The vehicle
    /// - `Err(AppError::NotFound)`: No vehicle with this ID
    pub async fn get(&self, id: i32) -> Result<Vehicle, AppError> {
        VehicleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Vehicle not found"))
    }

    /// Fleet counts per status.
    ///
    /// # Returns
    /// - `Ok(VehicleStats)`: Total plus available, rented, maintenance and out-of-service counts
    /// - `Err(AppError::DbErr)`: Database error
    pub async fn stats(&self) -> Result<VehicleStats, AppError> {
        let vehicle_repo = VehicleRepository::new(self.db);

        Ok(VehicleStats {
            total: vehicle_repo.count().await?,
            available: vehicle_repo.count_by_status(VehicleStatus::Available).await?,
            rented: vehicle_repo.count_by_status(VehicleStatus::Rented).await?,
            maintenance: vehicle_repo
                .count_by_status(VehicleStatus::Maintenance)
                .await?,
            out_of_service: vehicle_repo
                .count_by_status(VehicleStatus::OutOfService)
                .await?,
        })
    }

    /// Adds a vehicle as `Available`.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - License plate or VIN already registered
    pub async fn add(&self, draft: VehicleDraft, images: VehicleImages) -> Result<Vehicle, AppError> {
        let vehicle_repo = VehicleRepository::new(self.db);
        ensure_unique(&vehicle_repo, &draft, None).await?;

        let vehicle = vehicle_repo.create(draft, images).await?;
        tracing::info!("Vehicle {} ({}) added", vehicle.id, vehicle.license_plate);

        Ok(vehicle)
    }

    /// Replaces a vehicle's descriptive fields. Status and images are kept.
    pub async fn update(&self, id: i32, draft: VehicleDraft) -> Result<Vehicle, AppError> {
        let vehicle_repo = VehicleRepository::new(self.db);
        ensure_unique(&vehicle_repo, &draft, Some(id)).await?;

        vehicle_repo
            .update_details(id, draft)
            .await?
            .ok_or_else(|| AppError::not_found("Vehicle not found"))
    }

    /// Sets the status from its wire name.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Status missing or not a known status
    /// - `Err(AppError::NotFound)` - No vehicle with this id
    pub async fn set_status(&self, id: i32, status: Option<String>) -> Result<Vehicle, AppError> {
        let Some(status) = status.filter(|s| !s.trim().is_empty()) else {
            return Err(AppError::bad_request("Status is required"));
        };
        let status = parse_vehicle_status(&status)?;

        if !VehicleRepository::new(self.db).set_status(id, status).await? {
            return Err(AppError::not_found("Vehicle not found"));
        }

        self.get(id).await
    }

    /// Deletes a vehicle with its reservation and maintenance history.
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let txn = self.db.begin().await?;
        remove_with_history(&txn, id).await?;
        txn.commit().await?;

        tracing::info!("Vehicle {} deleted", id);
        Ok(())
    }
}

/// Rejects a draft whose plate or VIN belongs to another vehicle.
pub async fn ensure_unique<C: ConnectionTrait>(
    vehicle_repo: &VehicleRepository<'_, C>,
    draft: &VehicleDraft,
    excluding: Option<i32>,
) -> Result<(), AppError> {
    if vehicle_repo
        .license_plate_taken(&draft.license_plate, excluding)
        .await?
    {
        return Err(AppError::conflict(
            "Vehicle with this license plate already exists",
        ));
    }

    if let Some(vin) = &draft.vin {
        if vehicle_repo.vin_taken(vin, excluding).await? {
            return Err(AppError::conflict("Vehicle with this VIN already exists"));
        }
    }

    Ok(())
}

/// Deletes a vehicle and everything hanging off it, inside the caller's transaction.
///
/// # Returns
/// - `Err(AppError::NotFound)` - No vehicle with this id
/// - `Err(AppError::Conflict)` - The vehicle still has confirmed reservations
pub async fn remove_with_history<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), AppError> {
    let vehicle_repo = VehicleRepository::new(db);
    let reservation_repo = ReservationRepository::new(db);

    if vehicle_repo.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Vehicle not found"));
    }

    if reservation_repo.count_confirmed_for_vehicle(id).await? > 0 {
        return Err(AppError::conflict(
            "Cannot delete a vehicle with active reservations",
        ));
    }

    reservation_repo.delete_by_vehicle(id).await?;
    MaintenanceRepository::new(db).delete_by_car(id).await?;
    vehicle_repo.delete(id).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use test_utils::{builder::TestBuilder, factory};

    fn draft(plate: &str, vin: Option<&str>) -> VehicleDraft {
        VehicleDraft {
            make: "Kia".to_string(),
            model: "Rio".to_string(),
            vehicle_type: "Hatchback".to_string(),
            year: 2020,
            color: "Grey".to_string(),
            license_plate: plate.to_string(),
            vin: vin.map(str::to_string),
            fuel_type: "Petrol".to_string(),
            transmission: "Manual".to_string(),
            seating_capacity: 5,
            mileage: None,
            price_per_day: Decimal::new(3500, 2),
            location: "Harbor".to_string(),
            description: None,
            features: None,
        }
    }

    /// Tests duplicate plate and VIN detection on add.
    ///
    /// Expected: Conflict naming the duplicated field
    #[tokio::test]
    async fn add_rejects_duplicates() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_vehicle_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = VehicleService::new(db);

        let added = service
            .add(draft("KI 100", Some("KNADE123456789012")), VehicleImages::default())
            .await?;
        assert_eq!(added.status, VehicleStatus::Available);

        let plate = service
            .add(draft("KI 100", None), VehicleImages::default())
            .await;
        assert!(matches!(
            plate,
            Err(AppError::Conflict(msg)) if msg == "Vehicle with this license plate already exists"
        ));

        let vin = service
            .add(draft("KI 101", Some("KNADE123456789012")), VehicleImages::default())
            .await;
        assert!(matches!(
            vin,
            Err(AppError::Conflict(msg)) if msg == "Vehicle with this VIN already exists"
        ));

        Ok(())
    }

    /// Tests that an update may keep the vehicle's own plate.
    ///
    /// Expected: update succeeds with the same plate and new price
    #[tokio::test]
    async fn update_allows_own_plate() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_vehicle_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = VehicleService::new(db);

        let vehicle = service
            .add(draft("KI 200", None), VehicleImages::default())
            .await?;

        let mut changed = draft("KI 200", None);
        changed.price_per_day = Decimal::new(4200, 2);
        let updated = service.update(vehicle.id, changed).await?;

        assert_eq!(updated.license_plate, "KI 200");
        assert_eq!(updated.price_per_day, Decimal::new(4200, 2));

        Ok(())
    }

    /// Tests status patch validation.
    ///
    /// Expected: missing and unknown statuses rejected, a valid one applied
    #[tokio::test]
    async fn set_status_parses_wire_names() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_vehicle_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = VehicleService::new(db);

        let vehicle = factory::create_vehicle(db).await?;

        assert!(matches!(
            service.set_status(vehicle.id, None).await,
            Err(AppError::BadRequest(msg)) if msg == "Status is required"
        ));
        assert!(matches!(
            service.set_status(vehicle.id, Some("Flying".to_string())).await,
            Err(AppError::BadRequest(msg)) if msg == "Invalid status: Flying"
        ));

        let updated = service
            .set_status(vehicle.id, Some("Out_of_Service".to_string()))
            .await?;
        assert_eq!(updated.status, VehicleStatus::OutOfService);

        Ok(())
    }

    /// Tests statistics by status.
    ///
    /// Expected: counts per status and overall total
    #[tokio::test]
    async fn stats_count_by_status() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_vehicle_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        factory::create_vehicle(db).await?;
        factory::create_vehicle(db).await?;
        factory::vehicle::VehicleFactory::new(db)
            .status(VehicleStatus::Rented)
            .build()
            .await?;
        factory::vehicle::VehicleFactory::new(db)
            .status(VehicleStatus::Maintenance)
            .build()
            .await?;

        let stats = VehicleService::new(db).stats().await?;
        assert_eq!(
            stats,
            VehicleStats {
                total: 4,
                available: 2,
                rented: 1,
                maintenance: 1,
                out_of_service: 0,
            }
        );

        Ok(())
    }

    /// Tests deletion guarded by confirmed reservations.
    ///
    /// Expected: Conflict while a confirmed booking exists, success once it is
    /// cancelled, history removed with the vehicle
    #[tokio::test]
    async fn delete_requires_no_confirmed_reservations() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_all_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let service = VehicleService::new(db);

        let (user, vehicle) = factory::create_customer_and_vehicle(db).await?;
        let booking = factory::reservation::create_reservation(db, vehicle.id, user.id).await?;
        factory::maintenance::create_maintenance_record(db, vehicle.id).await?;

        assert!(matches!(
            service.delete(vehicle.id).await,
            Err(AppError::Conflict(_))
        ));

        ReservationRepository::new(db)
            .cancel_if_confirmed(booking.id)
            .await?;
        service.delete(vehicle.id).await?;

        assert!(matches!(service.get(vehicle.id).await, Err(AppError::NotFound(_))));
        assert!(ReservationRepository::new(db)
            .get_by_vehicle(vehicle.id)
            .await?
            .is_empty());
        assert!(MaintenanceRepository::new(db)
            .get_by_car(vehicle.id)
            .await?
            .is_empty());

        Ok(())
    }
}
