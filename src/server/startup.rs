use axum::http::{header, HeaderValue, Method};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::{admin::AdminService, mail::Mailer},
};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then runs all pending SeaORM migrations so the schema is up to date
/// before any request is served.
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions expire after `SESSION_DAYS` days of inactivity.
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool();
    let session_store = SqliteStore::new(pool.clone());
    session_store.migrate().await?;

    let layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(
            config.session_days,
        )));

    Ok(layer)
}

/// CORS for the configured frontend origin. Credentials are allowed so the session
/// cookie is sent cross-origin.
pub fn setup_cors(config: &Config) -> Result<CorsLayer, AppError> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: "ALLOWED_ORIGIN".to_string(),
            value: config.allowed_origin.clone(),
        })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]))
}

/// Builds the mail transport. Without mail API settings, messages are only logged.
pub fn setup_mailer(config: &Config) -> Result<Mailer, AppError> {
    let mailer = Mailer::from_config(config.mail.clone())?;

    if matches!(mailer, Mailer::Log(_)) {
        tracing::warn!("MAIL_API_URL not set; outgoing email will only be logged");
    }

    Ok(mailer)
}

/// Creates the seed super admin on an empty admin table when a seed password is set.
pub async fn check_for_admin(
    db: &DatabaseConnection,
    config: &Config,
    mailer: &Mailer,
) -> Result<(), AppError> {
    let admin_service = AdminService::new(db, mailer);

    let seeded = admin_service
        .seed(config.seed_admin_password.as_deref())
        .await?;

    if seeded.is_none() && admin_service.is_first_admin().await? {
        tracing::info!("No admin accounts exist; register one through POST /api/admin/register");
    }

    Ok(())
}
