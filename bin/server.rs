// Customer API - Web Server

use anyhow::{Context, Result};
use tracing::info;

use customer_api::api::{build_router, AppState};
use customer_api::{open_store, AppConfig, CustomerService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    customer_api::config::init_logging(&config);

    let store = open_store(&config.database.path)?;
    let state = AppState::new(CustomerService::new(store));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;

    info!(version = customer_api::VERSION, bind = %config.server.bind, "customer server running");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
