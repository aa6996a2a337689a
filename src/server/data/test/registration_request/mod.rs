use crate::server::data::registration_request::{
    NewRegistrationRequest, RegistrationRequestRepository,
};
use entity::sea_orm_active_enums::ApprovalStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod pending_exists;
mod resolve_if_pending;
