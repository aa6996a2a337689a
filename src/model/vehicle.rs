use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDto {
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
    pub status: String,
    pub description: Option<String>,
    pub features: Option<String>,
    pub vehicle_image_1: Option<String>,
    pub vehicle_image_2: Option<String>,
    pub vehicle_image_3: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Vehicle fields as submitted by a client.
///
/// Every field is optional on the wire so that missing values are reported with a
/// field-specific message instead of a generic deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraftDto {
    pub make: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: Option<String>,
    pub year: Option<i32>,
    pub color: Option<String>,
    pub license_plate: Option<String>,
    pub vin: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub seating_capacity: Option<i32>,
    pub mileage: Option<i32>,
    pub price_per_day: Option<Decimal>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehicleSearchQuery {
    pub location: Option<String>,
    #[serde(alias = "type")]
    pub vehicle_type: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VehicleStatusUpdateDto {
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatsDto {
    pub total: u64,
    pub available: u64,
    pub rented: u64,
    pub maintenance: u64,
    pub out_of_service: u64,
}
