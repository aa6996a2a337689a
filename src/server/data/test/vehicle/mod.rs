use crate::server::{
    data::vehicle::VehicleRepository,
    model::vehicle::{VehicleDraft, VehicleImages, VehicleSearchParams},
};
use entity::sea_orm_active_enums::VehicleStatus;
use rust_decimal::Decimal;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod mark_rented_if_available;
mod search;
mod update_details;

fn draft(plate: &str) -> VehicleDraft {
    VehicleDraft {
        make: "Mazda".to_string(),
        model: "CX-5".to_string(),
        vehicle_type: "SUV".to_string(),
        year: 2021,
        color: "Red".to_string(),
        license_plate: plate.to_string(),
        vin: None,
        fuel_type: "Petrol".to_string(),
        transmission: "Automatic".to_string(),
        seating_capacity: 5,
        mileage: Some(30000),
        price_per_day: Decimal::new(7000, 2),
        location: "Airport".to_string(),
        description: None,
        features: Some("AWD".to_string()),
    }
}
