use crate::server::{
    data::admin::{AdminRepository, NewAdmin},
    model::admin::UpdateAdminParams,
};
use entity::sea_orm_active_enums::{AdminRole, AdminStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_active;
mod find_by_username_or_email;
mod update_profile;
