//! Workspace MCP - file access confined to one workspace directory
//!
//! # Configuration
//! Set `WORKSPACE` to the directory to serve and `DEBUG=true` for verbose
//! logs, or put `workspace`/`debug` in `~/.config/workspace-mcp/config.toml`
//! (path overridable with `WORKSPACE_MCP_CONFIG_PATH`).

use rmcp::{transport::stdio, ServiceExt};

use workspace_mcp::{Config, WorkspaceMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    mcp_common::init_tracing("workspace_mcp", config.debug)?;

    tracing::info!("Starting Workspace MCP Server");

    let server = WorkspaceMcpServer::new(&config)?;
    tracing::info!(
        "Workspace root: {}",
        server.accessor().sandbox().root().display()
    );

    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
