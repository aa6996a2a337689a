use sea_orm::entity::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum VehicleStatus {
    #[sea_orm(string_value = "Available")]
    Available,
    #[sea_orm(string_value = "Rented")]
    Rented,
    #[sea_orm(string_value = "Maintenance")]
    Maintenance,
    #[sea_orm(string_value = "Out_of_Service")]
    OutOfService,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReservationStatus {
    #[sea_orm(string_value = "Confirmed")]
    Confirmed,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

/// Lifecycle shared by every staged request (registrations, pending vehicle
/// changes, pending maintenance) and by customer accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "REJECTED")]
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AdminRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "SUPER_ADMIN")]
    SuperAdmin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum AdminStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "INACTIVE")]
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ChangeType {
    #[sea_orm(string_value = "ADD")]
    Add,
    #[sea_orm(string_value = "REMOVE")]
    Remove,
    #[sea_orm(string_value = "UPDATE")]
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Amenity {
    #[sea_orm(string_value = "none")]
    None,
    #[sea_orm(string_value = "baby-sitter")]
    BabySitter,
    #[sea_orm(string_value = "gps")]
    Gps,
    #[sea_orm(string_value = "power-bank")]
    PowerBank,
}
