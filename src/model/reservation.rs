use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationDto {
    pub vehicle_id: Option<i32>,
    pub user_id: Option<i32>,
    pub rental_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub amenities: Option<Vec<String>>,
    pub total_price: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDto {
    pub id: i32,
    pub vehicle_id: i32,
    pub user_id: i32,
    pub rental_date: NaiveDate,
    pub return_date: NaiveDate,
    pub days: i64,
    pub amenities: Vec<String>,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
