//! Maze playback server.

use maze_server::config::Config;
use maze_server::server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    info!(
        "Starting maze-server on {} (http {}, max_clients = {}, default pace = {:?})",
        config.socket_addr_string(),
        config.http_addr_string(),
        config.max_clients,
        config.default_pace
    );

    server::run(config).await
}
