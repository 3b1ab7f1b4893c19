//! Server bootstrap

use crate::config::Config;
use crate::server::server::GatewayServer;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Load configuration from the environment and run the gateway
pub async fn run_server() -> Result<()> {
    let config = Config::from_env()?;
    info!(
        "Starting {} v{} on {}:{}",
        crate::NAME,
        crate::VERSION,
        config.server.host,
        config.server.port
    );

    let server = GatewayServer::new(config)?;
    server
        .start()
        .await
        .map_err(|err| GatewayError::Internal(format!("Server error: {}", err)))
}
