mod dashboard;
mod join;
mod router;
mod telemetry;

use std::net::SocketAddr;

use tracing::info;

use fs_intake_storage::Database;
use fs_intake_util::{load_env_file, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env_file();
    let config = AppConfig::from_env()?;

    telemetry::init_tracing(&config)?;
    let metrics = telemetry::init_metrics()?;

    let storage = Database::connect(&config.database_url).await?;
    storage.run_migrations().await?;
    info!(stage = "storage", url = %config.database_url, "recruits table ready");

    let state = router::AppState::new(metrics, storage, config.timezone);

    let addr: SocketAddr = config.bind_addr;
    info!(stage = "app", %addr, env = %config.environment.as_str(), "starting HTTP server");
    info!(stage = "app", "admin dashboard at http://{addr}/fs-admin-888");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router::app_router(state))
        .await
        .map_err(|err| err.into())
}
