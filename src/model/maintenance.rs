use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maintenance event as submitted for direct creation, update, or approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceInputDto {
    pub car_id: Option<i32>,
    #[serde(rename = "type")]
    pub maintenance_type: Option<String>,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
    pub next_date: Option<DateTime<Utc>>,
    pub mechanic: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub mileage: Option<i32>,
    pub receipt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecordDto {
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
    pub completed_at: DateTime<Utc>,
}
