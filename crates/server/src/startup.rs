use std::future::Future;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file when present, otherwise defaults plus environment variables.
fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Public entry: build the app and run the HTTP server until the process ends.
pub async fn run() -> anyhow::Result<()> {
    run_with_shutdown(std::future::pending()).await
}

/// Build the app and serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_with_shutdown<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    runtime::ensure_env(&cfg.uploads.dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!(event = "migrated", "database schema up to date");

    let state = ServerState::build(db, &cfg.uploads).await?;
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, uploads = %cfg.uploads.dir, base_url = %cfg.uploads.public_base_url, "starting happy server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}
