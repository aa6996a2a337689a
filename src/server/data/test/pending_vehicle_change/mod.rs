use crate::server::{
    data::pending_vehicle_change::PendingVehicleChangeRepository,
    error::AppError,
    model::pending::VehicleChange,
};
use entity::sea_orm_active_enums::{ApprovalStatus, ChangeType};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod resolve_if_pending;
