//! relayd - a star-topology message relay daemon.

use relayd::config::Config;
use relayd::network::Gateway;
use relayd::registry::Registry;
use std::sync::Arc;
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

    // Load configuration; with no argument, run on built-in defaults.
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(&path).map_err(|e| {
            error!(path = %path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    };

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        "Starting relayd"
    );

    let registry = Arc::new(Registry::new());
    let gateway = Gateway::bind(config.listen.address, registry).await?;

    gateway.run().await
}
