//! Doubao MCP server binary.
//!
//! Communicates with AI clients (e.g. Claude Desktop) over stdio JSON-RPC.

use anyhow::{Context, Result};
use rmcp::{transport::stdio, ServiceExt};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use doubao_mcp::ark::ArkClient;
use doubao_mcp::config::Settings;
use doubao_mcp::dispatch::Dispatcher;
use doubao_mcp::mcp::DoubaoMcp;

#[tokio::main]
async fn main() -> Result<()> {
    // Log to stderr so stdout stays clean for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::load().context("failed to load settings")?;

    info!(
        base_url = %settings.base_url,
        image_endpoint_id = ?settings.image_endpoint_id,
        video_endpoint_id = ?settings.video_endpoint_id,
        "loaded settings"
    );

    let defaults = settings.tool_defaults();
    let ark = ArkClient::new(settings.base_url, settings.api_key);
    let dispatcher = Arc::new(Dispatcher::new(ark, defaults));

    let server = DoubaoMcp::new(dispatcher);

    info!("Doubao MCP server starting on stdio");

    let service = server
        .serve(stdio())
        .await
        .context("MCP server failed to start")?;

    service.waiting().await?;

    Ok(())
}
