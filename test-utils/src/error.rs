use thiserror::Error;

/// Errors raised while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// Connecting to the in-memory database or creating a table failed.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Creating the session store table failed.
    #[error("Failed to prepare session store: {0}")]
    Session(String),
}
