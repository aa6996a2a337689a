use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Tables are created in the order they are added, so tables holding foreign keys
/// must be added after the tables they reference.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{Vehicle, Reservation};
///
/// let test = TestBuilder::new()
///     .with_table(Vehicle)
///     .with_table(Reservation)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables needed for inventory and booking tests.
    ///
    /// Adds Vehicle, Reservation, ReservationAmenity and MaintenanceRecord in
    /// dependency order.
    pub fn with_vehicle_tables(self) -> Self {
        self.with_table(Vehicle)
            .with_table(Reservation)
            .with_table(ReservationAmenity)
            .with_table(MaintenanceRecord)
    }

    /// Adds the account tables: Admin, User and RegistrationRequest.
    pub fn with_account_tables(self) -> Self {
        self.with_table(Admin)
            .with_table(User)
            .with_table(RegistrationRequest)
    }

    /// Adds the staged-change tables used by the approval workflows.
    pub fn with_pending_tables(self) -> Self {
        self.with_table(PendingVehicleChange)
            .with_table(PendingMaintenanceRecord)
    }

    /// Adds every table in the schema.
    pub fn with_all_tables(self) -> Self {
        self.with_account_tables()
            .with_vehicle_tables()
            .with_pending_tables()
    }

    /// Builds the test context, connecting to an in-memory SQLite database and
    /// creating all configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Context with database connection and tables created
    /// - `Err(TestError::Database)` - Connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(self.tables).await?;
        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
