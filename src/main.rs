//! lecternd - classroom session relay server.

use std::sync::Arc;

use lecternd::config::Config;
use lecternd::network::Gateway;
use lecternd::state::Registry;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "lectern.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;
    let addr = config.listen_addr()?;

    let registry = Arc::new(Registry::new());
    let gateway = Gateway::bind(addr, Arc::clone(&registry)).await?;

    info!(addr = %gateway.local_addr()?, "Signaling relay running");

    gateway.run().await
}
