//! restmcp: MCP server binary.
//!
//! Serves the catalog and astronomy tools over stdio (default) or
//! streamable HTTP.
//!
//! # Usage
//!
//! ```bash
//! # stdio, for hosts that spawn the server
//! restmcp
//!
//! # HTTP on 0.0.0.0:8000/mcp against the live catalog API
//! MCP_TRANSPORT=http CATALOG_SOURCE=remote API_TOKEN=... restmcp
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use rmcp::service::ServiceExt;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::StreamableHttpService;
use tracing_subscriber::EnvFilter;

use restmcp::config::{Config, TransportKind};
use restmcp::server::RestToolServer;

/// restmcp - MCP tools over REST APIs
#[derive(Parser)]
#[command(name = "restmcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server exposing catalog and solar system REST APIs as tools")]
struct Cli {
    #[command(flatten)]
    config: Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("restmcp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().config;
    tracing::info!(?config, "restmcp starting");

    let server = RestToolServer::from_config(&config).context("Failed to build API clients")?;

    match config.transport {
        TransportKind::Stdio => {
            tracing::info!("Serving on stdio");
            let service = server
                .serve(stdio())
                .await
                .context("Failed to start MCP service")?;
            service.waiting().await?;
        }
        TransportKind::Http => {
            let service = StreamableHttpService::new(
                move || Ok(server.clone()),
                LocalSessionManager::default().into(),
                Default::default(),
            );
            let router = axum::Router::new().nest_service("/mcp", service);

            let addr = config.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!(%addr, "Serving streamable HTTP at /mcp");

            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    // Explicitly ignored: a failed signal handler just means no graceful stop
                    let _ = tokio::signal::ctrl_c().await;
                })
                .await
                .context("HTTP server failed")?;
        }
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}
