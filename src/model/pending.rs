use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::vehicle::VehicleDraftDto;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingVehicleChangeDto {
    pub id: i32,
    pub change_type: String,
    pub vehicle_data: Option<VehicleDraftDto>,
    pub vehicle_id: Option<i32>,
    pub requested_by: i32,
    pub requested_at: DateTime<Utc>,
    pub status: String,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PendingMaintenanceDto {
    pub id: i32,
    pub car_id: i32,
    #[serde(rename = "type")]
    pub maintenance_type: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: DateTime<Utc>,
    pub next_date: Option<DateTime<Utc>>,
    pub mechanic: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub mileage: Option<i32>,
    pub receipt: Option<String>,
    pub requested_by: i32,
    pub requested_at: DateTime<Utc>,
    pub approval_status: String,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RejectDto {
    pub reason: Option<String>,
}
