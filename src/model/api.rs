use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    pub status: String,
}
