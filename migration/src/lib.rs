pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_admin_table;
mod m20250601_000002_create_user_table;
mod m20250601_000003_create_registration_request_table;
mod m20250601_000004_create_vehicle_table;
mod m20250601_000005_create_reservation_table;
mod m20250601_000006_create_reservation_amenity_table;
mod m20250601_000007_create_pending_vehicle_change_table;
mod m20250601_000008_create_maintenance_record_table;
mod m20250601_000009_create_pending_maintenance_record_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_admin_table::Migration),
            Box::new(m20250601_000002_create_user_table::Migration),
            Box::new(m20250601_000003_create_registration_request_table::Migration),
            Box::new(m20250601_000004_create_vehicle_table::Migration),
            Box::new(m20250601_000005_create_reservation_table::Migration),
            Box::new(m20250601_000006_create_reservation_amenity_table::Migration),
            Box::new(m20250601_000007_create_pending_vehicle_change_table::Migration),
            Box::new(m20250601_000008_create_maintenance_record_table::Migration),
            Box::new(m20250601_000009_create_pending_maintenance_record_table::Migration),
        ]
    }
}
