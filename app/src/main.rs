//! Garrison daemon: staking dashboard service
//!
//! Serves the dashboard API on localhost for a presentation layer to
//! consume. The RPC endpoint and port come from the environment, everything
//! else from runtime configuration endpoints.

use garrison_api::AppState;
use garrison_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("garrison=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting Garrison daemon");

    let mut config = AppConfig::default();
    if let Ok(url) = std::env::var("GARRISON_RPC_URL") {
        config.rpc.url = url;
    }
    if let Ok(port) = std::env::var("GARRISON_API_PORT") {
        config.api_port = port
            .parse()
            .map_err(|_| anyhow::anyhow!("GARRISON_API_PORT is not a port number: {}", port))?;
    }

    let port = config.api_port;
    let state = AppState::with_config(config);

    garrison_api::start_server(state, port).await?;
    Ok(())
}
