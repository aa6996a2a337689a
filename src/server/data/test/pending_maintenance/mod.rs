use crate::server::data::pending_maintenance::PendingMaintenanceRepository;
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_pending;
