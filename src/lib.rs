pub mod api;
pub mod modules;
mod schema;
pub mod shared;

use std::sync::Arc;

use anyhow::Context;

use api::{build_router, AppState, Repositories};
use modules::auth::LogMailDispatcher;
use shared::{AppConfig, Database};

/// Connect, migrate and serve until ctrl-c.
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let database = Arc::new(
        Database::connect(&config.database).context("Failed to connect to database")?,
    );

    let migrator = Arc::clone(&database);
    tokio::task::spawn_blocking(move || migrator.run_migrations())
        .await
        .context("Migration task panicked")?
        .context("Failed to run database migrations")?;

    let state = AppState::new(
        Repositories::postgres(&database),
        &config,
        Arc::new(LogMailDispatcher),
    )
    .context("Failed to initialise services")?
    .with_database(Arc::clone(&database));

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    log_info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log_info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log_error!("Failed to listen for shutdown signal: {}", e);
    }
}
