use anyhow::Context;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::info;

use clinic_backend::{
    app::create_router,
    app_state::AppState,
    config, db,
    i18n::init_i18n,
    telemetry::{init_telemetry, TelemetryConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = config::init().context("Failed to load configuration")?;

    let telemetry = init_telemetry(TelemetryConfig::for_service(
        config.app.name.clone(),
        config.app.environment.as_str(),
    ))
    .await?;

    let pool = db::init_pool(&config.database)
        .await
        .context("Failed to initialize database")?;

    let localizer = init_i18n(config.app.locales_dir.as_deref(), config.app.default_language)
        .context("Failed to load translations")?;

    let state = AppState::new(pool, config.clone(), Arc::new(localizer));
    let app = create_router(state);

    let addr = config.server_addr();
    info!("{} listening on {}", config.app.name, addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to serve application")?;

    telemetry.shutdown().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
