//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and a `create_*` shortcut
//! for default creation. All factories insert into the database immediately on `build()`.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let vehicle = factory::vehicle::VehicleFactory::new(db)
//!     .price_per_day(Decimal::new(5000, 2))
//!     .build()
//!     .await?;
//! let admin = factory::admin::create_super_admin(db).await?;
//! ```

pub mod admin;
pub mod helpers;
pub mod maintenance;
pub mod pending_vehicle_change;
pub mod registration_request;
pub mod reservation;
pub mod user;
pub mod vehicle;

pub use admin::{create_admin, create_super_admin};
pub use helpers::create_customer_and_vehicle;
pub use user::create_user;
pub use vehicle::create_vehicle;
