use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Test environment holding an in-memory SQLite connection and, on demand, a session
/// stored in that same database.
pub struct TestContext {
    /// Connection to the in-memory database, created on first use.
    pub db: Option<DatabaseConnection>,

    /// Session backed by the SQLite session store, created on first use.
    pub session: Option<Session>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Gets or creates the in-memory SQLite database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Reference to the database connection
    /// - `Err(TestError::Database)` - Failed to open the in-memory database
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;
                Ok(&*self.db.insert(db))
            }
        }
    }

    /// Executes the CREATE TABLE statements in order.
    ///
    /// # Arguments
    /// - `stmts` - Statements produced by `TestBuilder`
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Gets or creates the test session.
    ///
    /// On first call the session table is migrated into the in-memory database and a
    /// fresh session with a 7 day inactivity expiry is created.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Reference to the session instance
    /// - `Err(TestError)` - Failed to open the database or create the session table
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        match self.session {
            Some(ref session) => Ok(session),
            None => {
                let db = self.database().await?;

                let pool = db.get_sqlite_connection_pool();
                let session_store = SqliteStore::new(pool.clone());
                session_store
                    .migrate()
                    .await
                    .map_err(|e| TestError::Session(e.to_string()))?;

                let session = Session::new(
                    None,
                    Arc::new(session_store),
                    Some(Expiry::OnInactivity(Duration::days(7))),
                );

                Ok(&*self.session.insert(session))
            }
        }
    }

    /// Gets or creates both the database and the session.
    ///
    /// Avoids overlapping mutable borrows when a test needs both at once.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.database().await?;
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(TestError::Session("test context not initialized".to_string())),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
