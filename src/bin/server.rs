//! GGD compliance HTTP server binary.
//!
//! Loads the configuration directory, installs the log subscriber and
//! serves the summary, table and export endpoints.
//!
//! # Environment Variables
//!
//! - `GGD_CONFIG_DIR`: configuration directory (default: `./config/ggd`)
//! - `RUST_LOG`: log filter; overrides `log_level` from `service.yaml`

use std::env;
use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use ggd_compliance::api::{AppState, create_router};
use ggd_compliance::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/ggd";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config_dir = env::var("GGD_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.service().log_level)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()?;

    let bind_address = config.service().bind_address.clone();
    info!(config_dir = %config_dir, "Configuration loaded");

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
