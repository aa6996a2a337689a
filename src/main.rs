mod model;
mod server;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    config::Config, error::AppError, router, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let cors = startup::setup_cors(&config)?;
    let mailer = startup::setup_mailer(&config)?;

    startup::check_for_admin(&db, &config, &mailer).await?;

    let state = AppState::new(db, mailer);

    let (api, openapi) = router::router();
    let app = api
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi))
        .with_state(state)
        .layer(session)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
