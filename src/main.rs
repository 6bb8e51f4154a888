use pocket_gateway::{Config, api::Server};
use tracing::info;

/// The main entry point for the gateway.
///
/// Initializes logging, loads configuration (falling back to defaults when
/// no file is present) with environment overrides applied on top, and
/// starts the API server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::var("POCKET_GATEWAY_CONFIG")
        .unwrap_or_else(|_| "config/default.toml".to_string());
    let mut config = Config::load_or_default(&path)?;
    config.apply_env_overrides();
    info!(
        "Gateway starting with binary {} and {} networks",
        config.binary.path,
        config.networks.len()
    );

    let server = Server::new(config)?;
    server.start().await?;

    Ok(())
}
