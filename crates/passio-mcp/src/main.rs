use anyhow::{Context, Result};
use passio_lib::PassioConfig;
use passio_mcp::PassioMcpServer;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("passio_mcp=info".parse()?)
                .add_directive("passio_lib=info".parse()?),
        )
        .init();

    let config = PassioConfig::from_env().context("invalid PASSIO_* configuration")?;
    info!("Connecting to {}", config.base_url);

    let server = PassioMcpServer::connect(&config)
        .await
        .context("failed to load the transportation system catalog")?;
    server.serve_stdio().await
}
