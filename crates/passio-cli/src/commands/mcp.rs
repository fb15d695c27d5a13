//! `mcp` subcommand: serve the transit tools over stdio.

use anyhow::{Context, Result};
use passio_mcp::PassioMcpServer;
use tokio::select;
use tokio::signal;

use crate::GlobalOptions;

/// Public entrypoint orchestrating the MCP server lifecycle
pub async fn run_mcp_server(global: &GlobalOptions) -> Result<()> {
    let config = global.config()?;
    tracing::info!("Loading transportation systems...");

    let server = PassioMcpServer::connect(&config)
        .await
        .context("Failed to initialize MCP server")?;

    tracing::info!("MCP server initialized, waiting for requests...");
    select! {
        result = server.serve_stdio() => result?,
        _ = signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, exiting gracefully");
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
