//! Rentals Test Utils
//!
//! Shared testing utilities for the rental backend. Provides a builder for test contexts
//! backed by in-memory SQLite databases, an optional session bound to the same database,
//! and factories that insert entities with sensible defaults.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Vehicle;
//!
//! #[tokio::test]
//! async fn test_vehicle_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Vehicle)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
