//! MCP Server entry point for Porkbun
//!
//! Starts the MCP server with stdio transport. Credentials come from
//! `PORKBUN_API_KEY` / `PORKBUN_SECRET_KEY`, falling back to the CLI's config file.

mod schemas;
mod server;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use porkbun_api::PorkbunClient;
use porkbun_core::{AppConfig, ConfigOverrides, FileCredentialStore, ServiceContext};
use rmcp::ServiceExt;
use server::PorkbunMcp;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

async fn build_context() -> anyhow::Result<Arc<ServiceContext>> {
    let store = FileCredentialStore::locate(None)?;
    let config = AppConfig::resolve(&ConfigOverrides::default(), &store)
        .await
        .context("Failed to load Porkbun credentials")?;
    let client = PorkbunClient::new(config.credentials, &config.client)?;
    Ok(Arc::new(ServiceContext::new(Arc::new(client))))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Porkbun MCP Server");

    let ctx = match build_context().await {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mcp_server = PorkbunMcp::new(&ctx);
    tracing::info!("MCP server initialized with 5 tools");

    // Start serving via stdio
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Wait for the server to complete
    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
