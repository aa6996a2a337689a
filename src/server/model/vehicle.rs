//! Vehicle inventory domain models and parameters.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::VehicleStatus;
use rust_decimal::Decimal;
use sea_orm::ActiveEnum;

use crate::{
    model::vehicle::{VehicleDraftDto, VehicleDto, VehicleSearchQuery, VehicleStatsDto},
    server::{error::AppError, util::validation},
};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2030;

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub vehicle_type: String,
    pub year: i32,
    pub color: String,
    pub license_plate: String,
    pub vin: Option<String>,
    pub fuel_type: String,
    pub transmission: String,
    pub seating_capacity: i32,
    pub mileage: Option<i32>,
    pub price_per_day: Decimal,
    pub location: String,
    pub status: VehicleStatus,
    pub description: Option<String>,
    pub features: Option<String>,
    pub images: VehicleImages,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn from_entity(entity: entity::vehicle::Model) -> Self {
        Self {
            id: entity.id,
            make: entity.make,
            model: entity.model,
            vehicle_type: entity.vehicle_type,
            year: entity.year,
            color: entity.color,
            license_plate: entity.license_plate,
            vin: entity.vin,
            fuel_type: entity.fuel_type,
            transmission: entity.transmission,
            seating_capacity: entity.seating_capacity,
            mileage: entity.mileage,
            price_per_day: entity.price_per_day,
            location: entity.location,
            status: entity.status,
            description: entity.description,
            features: entity.features,
            images: VehicleImages([
                entity.vehicle_image_1,
                entity.vehicle_image_2,
                entity.vehicle_image_3,
            ]),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> VehicleDto {
        let [vehicle_image_1, vehicle_image_2, vehicle_image_3] = self.images.0;

        VehicleDto {
            id: self.id,
            make: self.make,
            model: self.model,
            vehicle_type: self.vehicle_type,
            year: self.year,
            color: self.color,
            license_plate: self.license_plate,
            vin: self.vin,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            seating_capacity: self.seating_capacity,
            mileage: self.mileage,
            price_per_day: self.price_per_day.round_dp(2),
            location: self.location,
            status: self.status.to_value(),
            description: self.description,
            features: self.features,
            vehicle_image_1,
            vehicle_image_2,
            vehicle_image_3,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Up to three base64-encoded vehicle photos, in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleImages(pub [Option<String>; 3]);

impl VehicleImages {
    /// Stores `image` in slot `index` (0-based). Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, image: String) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = Some(image);
        }
    }
}

/// Validated descriptive vehicle fields, used for direct creation, updates and
/// staged pending changes.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleDraft {
    pub make: String,
    pub model: String,
    pub vehicle_type: String,
    pub year: i32,
    pub color: String,
    pub license_plate: String,
    pub vin: Option<String>,
    pub fuel_type: String,
    pub transmission: String,
    pub seating_capacity: i32,
    pub mileage: Option<i32>,
    pub price_per_day: Decimal,
    pub location: String,
    pub description: Option<String>,
    pub features: Option<String>,
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::bad_request(format!("{} is required", field)))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl VehicleDraft {
    /// Validates client-supplied vehicle fields.
    ///
    /// # Returns
    /// - `Ok(VehicleDraft)` - All fields present and well formed
    /// - `Err(AppError::BadRequest)` - The first failing rule's message
    pub fn from_dto(dto: VehicleDraftDto) -> Result<Self, AppError> {
        let make = required(dto.make, "Make")?;
        let model = required(dto.model, "Model")?;
        let vehicle_type = required(dto.vehicle_type, "Vehicle type")?;

        let year = dto
            .year
            .filter(|y| (MIN_YEAR..=MAX_YEAR).contains(y))
            .ok_or_else(|| {
                AppError::bad_request(format!(
                    "Year must be between {} and {}",
                    MIN_YEAR, MAX_YEAR
                ))
            })?;

        let color = required(dto.color, "Color")?;

        let license_plate = required(dto.license_plate, "License plate")?.to_uppercase();
        if !validation::is_license_plate(&license_plate) {
            return Err(AppError::bad_request(
                "License plate must be in format AA 999",
            ));
        }

        let vin = optional(dto.vin).map(|v| v.to_uppercase());
        if let Some(vin) = &vin {
            if !validation::is_vin(vin) {
                return Err(AppError::bad_request(
                    "VIN must be exactly 17 alphanumeric characters",
                ));
            }
        }

        let fuel_type = required(dto.fuel_type, "Fuel type")?;
        let transmission = required(dto.transmission, "Transmission")?;

        let seating_capacity = dto
            .seating_capacity
            .filter(|s| *s >= 1)
            .ok_or_else(|| AppError::bad_request("Seating capacity must be at least 1"))?;

        if let Some(mileage) = dto.mileage {
            if mileage < 0 {
                return Err(AppError::bad_request("Mileage cannot be negative"));
            }
        }

        let price_per_day = dto
            .price_per_day
            .filter(|p| *p > Decimal::ZERO)
            .ok_or_else(|| AppError::bad_request("Price per day must be greater than zero"))?;

        let location = required(dto.location, "Location")?;

        Ok(Self {
            make,
            model,
            vehicle_type,
            year,
            color,
            license_plate,
            vin,
            fuel_type,
            transmission,
            seating_capacity,
            mileage: dto.mileage,
            price_per_day,
            location,
            description: optional(dto.description),
            features: optional(dto.features),
        })
    }

    pub fn into_dto(self) -> VehicleDraftDto {
        VehicleDraftDto {
            make: Some(self.make),
            model: Some(self.model),
            vehicle_type: Some(self.vehicle_type),
            year: Some(self.year),
            color: Some(self.color),
            license_plate: Some(self.license_plate),
            vin: self.vin,
            fuel_type: Some(self.fuel_type),
            transmission: Some(self.transmission),
            seating_capacity: Some(self.seating_capacity),
            mileage: self.mileage,
            price_per_day: Some(self.price_per_day),
            location: Some(self.location),
            description: self.description,
            features: self.features,
        }
    }

    /// Serializes the draft for storage in a pending change row.
    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(&self.clone().into_dto())?)
    }

    /// Parses and re-validates a stored draft.
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let dto: VehicleDraftDto = serde_json::from_str(json)?;
        Self::from_dto(dto)
    }
}

/// Parses a vehicle status as it appears on the wire (`Available`, `Out_of_Service`, ...).
pub fn parse_vehicle_status(value: &str) -> Result<VehicleStatus, AppError> {
    VehicleStatus::try_from_value(&value.trim().to_string())
        .map_err(|_| AppError::bad_request(format!("Invalid status: {}", value)))
}

/// Public vehicle search filters. Status defaults to `Available`.
#[derive(Debug, Clone)]
pub struct VehicleSearchParams {
    pub location: Option<String>,
    pub vehicle_type: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub status: VehicleStatus,
}

impl VehicleSearchParams {
    pub fn from_query(query: VehicleSearchQuery) -> Result<Self, AppError> {
        let status = match optional(query.status) {
            Some(status) => parse_vehicle_status(&status)?,
            None => VehicleStatus::Available,
        };

        Ok(Self {
            location: optional(query.location),
            vehicle_type: optional(query.vehicle_type),
            min_price: query.min_price,
            max_price: query.max_price,
            status,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleStats {
    pub total: u64,
    pub available: u64,
    pub rented: u64,
    pub maintenance: u64,
    pub out_of_service: u64,
}

impl VehicleStats {
    pub fn into_dto(self) -> VehicleStatsDto {
        VehicleStatsDto {
            total: self.total,
            available: self.available,
            rented: self.rented,
            maintenance: self.maintenance,
            out_of_service: self.out_of_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> VehicleDraftDto {
        VehicleDraftDto {
            make: Some("Toyota".to_string()),
            model: Some("Corolla".to_string()),
            vehicle_type: Some("Sedan".to_string()),
            year: Some(2022),
            color: Some("White".to_string()),
            license_plate: Some("ab 123".to_string()),
            vin: Some("1HGCM82633A004352".to_string()),
            fuel_type: Some("Petrol".to_string()),
            transmission: Some("Automatic".to_string()),
            seating_capacity: Some(5),
            mileage: Some(12000),
            price_per_day: Some(Decimal::new(4500, 2)),
            location: Some("Downtown".to_string()),
            description: Some("   ".to_string()),
            features: None,
        }
    }

    fn message(dto: VehicleDraftDto) -> String {
        match VehicleDraft::from_dto(dto) {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn normalizes_valid_draft() {
        let draft = VehicleDraft::from_dto(dto()).unwrap();

        assert_eq!(draft.license_plate, "AB 123");
        assert_eq!(draft.description, None);
    }

    #[test]
    fn rejects_out_of_range_year() {
        let mut d = dto();
        d.year = Some(2031);
        assert_eq!(message(d), "Year must be between 1900 and 2030");
    }

    #[test]
    fn rejects_bad_plate_and_vin() {
        let mut d = dto();
        d.license_plate = Some("ABC123".to_string());
        assert_eq!(message(d), "License plate must be in format AA 999");

        let mut d = dto();
        d.vin = Some("SHORT".to_string());
        assert_eq!(message(d), "VIN must be exactly 17 alphanumeric characters");
    }

    #[test]
    fn rejects_missing_fields_and_bad_price() {
        let mut d = dto();
        d.make = None;
        assert_eq!(message(d), "Make is required");

        let mut d = dto();
        d.price_per_day = Some(Decimal::ZERO);
        assert_eq!(message(d), "Price per day must be greater than zero");
    }

    #[test]
    fn json_round_trip_revalidates() {
        let draft = VehicleDraft::from_dto(dto()).unwrap();
        let parsed = VehicleDraft::from_json(&draft.to_json().unwrap()).unwrap();
        assert_eq!(parsed, draft);
    }

    #[test]
    fn parses_wire_statuses() {
        assert_eq!(
            parse_vehicle_status("Out_of_Service").unwrap(),
            VehicleStatus::OutOfService
        );
        match parse_vehicle_status("Broken") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid status: Broken"),
            other => panic!("expected BadRequest, got {:?}", other),
        }
    }
}
