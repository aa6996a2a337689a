//! Vehicle factory for creating inventory entries.

use chrono::Utc;
use entity::sea_orm_active_enums::VehicleStatus;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::{license_plate_for, next_id, vin_for};

/// Factory for creating vehicles.
///
/// Defaults:
/// - make/model: `Toyota` / `Corolla`, type `Sedan`
/// - price_per_day: `50.00`
/// - location: `Downtown`
/// - status: `Available`
/// - license plate and VIN unique per factory call
pub struct VehicleFactory<'a> {
    db: &'a DatabaseConnection,
    license_plate: String,
    vin: Option<String>,
    vehicle_type: String,
    price_per_day: Decimal,
    location: String,
    status: VehicleStatus,
}

impl<'a> VehicleFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            license_plate: license_plate_for(id),
            vin: Some(vin_for(id)),
            vehicle_type: "Sedan".to_string(),
            price_per_day: Decimal::new(5000, 2),
            location: "Downtown".to_string(),
            status: VehicleStatus::Available,
        }
    }

    pub fn license_plate(mut self, plate: impl Into<String>) -> Self {
        self.license_plate = plate.into();
        self
    }

    pub fn vin(mut self, vin: Option<String>) -> Self {
        self.vin = vin;
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: impl Into<String>) -> Self {
        self.vehicle_type = vehicle_type.into();
        self
    }

    pub fn price_per_day(mut self, price: Decimal) -> Self {
        self.price_per_day = price;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn status(mut self, status: VehicleStatus) -> Self {
        self.status = status;
        self
    }

    pub async fn build(self) -> Result<entity::vehicle::Model, DbErr> {
        let now = Utc::now();
        entity::vehicle::ActiveModel {
            make: ActiveValue::Set("Toyota".to_string()),
            model: ActiveValue::Set("Corolla".to_string()),
            vehicle_type: ActiveValue::Set(self.vehicle_type),
            year: ActiveValue::Set(2022),
            color: ActiveValue::Set("White".to_string()),
            license_plate: ActiveValue::Set(self.license_plate),
            vin: ActiveValue::Set(self.vin),
            fuel_type: ActiveValue::Set("Petrol".to_string()),
            transmission: ActiveValue::Set("Automatic".to_string()),
            seating_capacity: ActiveValue::Set(5),
            mileage: ActiveValue::Set(Some(12000)),
            price_per_day: ActiveValue::Set(self.price_per_day),
            location: ActiveValue::Set(self.location),
            status: ActiveValue::Set(self.status),
            description: ActiveValue::Set(None),
            features: ActiveValue::Set(None),
            vehicle_image_1: ActiveValue::Set(None),
            vehicle_image_2: ActiveValue::Set(None),
            vehicle_image_3: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an available vehicle with default values.
pub async fn create_vehicle(db: &DatabaseConnection) -> Result<entity::vehicle::Model, DbErr> {
    VehicleFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_vehicles_with_unique_identifiers() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_vehicle_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_vehicle(db).await?;
        let second = create_vehicle(db).await?;

        assert_ne!(first.license_plate, second.license_plate);
        assert_ne!(first.vin, second.vin);
        assert_eq!(first.status, VehicleStatus::Available);

        Ok(())
    }
}
