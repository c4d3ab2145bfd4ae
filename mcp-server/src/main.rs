//! Catalog MCP Server
//!
//! This MCP server lets AI assistants manage the product catalog through the
//! HTTP API. It exposes tools for:
//! - Browsing products
//! - Creating, updating and deleting products
//! - Adjusting stock levels

mod client;
mod server;

use anyhow::Result;
use rmcp::ServiceExt;
use server::CatalogServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting catalog MCP server");

    let server = CatalogServer::from_env()?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}
