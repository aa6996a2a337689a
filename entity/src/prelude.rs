pub use super::admin::Entity as Admin;
pub use super::maintenance_record::Entity as MaintenanceRecord;
pub use super::pending_maintenance_record::Entity as PendingMaintenanceRecord;
pub use super::pending_vehicle_change::Entity as PendingVehicleChange;
pub use super::registration_request::Entity as RegistrationRequest;
pub use super::reservation::Entity as Reservation;
pub use super::reservation_amenity::Entity as ReservationAmenity;
pub use super::user::Entity as User;
pub use super::vehicle::Entity as Vehicle;
