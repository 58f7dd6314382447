//! Process configuration, read from command-line flags or environment variables.

use std::fmt;
use std::sync::Arc;

use clap::{Args, ValueEnum};

use crate::client::{Fetch, FetchError};
use crate::http::RestClient;
use crate::options::TransportOptions;
use crate::provider::{CatalogSource, FixtureCatalog, RemoteCatalog};

/// Where the catalog tools read their records from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CatalogSourceKind {
    /// Built-in sample records.
    #[default]
    Fixture,
    /// The REST API at `API_BASE_URL`.
    Remote,
}

/// How the MCP server talks to its host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    #[default]
    Stdio,
    /// Streamable HTTP on `host:port`, mounted at `/mcp`.
    Http,
}

#[derive(Args, Clone)]
pub struct Config {
    /// Base URL of the catalog API
    #[arg(long, env = "API_BASE_URL", default_value = "https://api.example.com/v1")]
    pub api_base_url: String,

    /// Bearer token for the catalog API (empty disables auth)
    #[arg(long, env = "API_TOKEN", default_value = "", hide_env_values = true)]
    pub api_token: String,

    /// Base URL of the Solar System OpenData API
    #[arg(
        long,
        env = "SOLAR_API_BASE_URL",
        default_value = "https://api.le-systeme-solaire.net/rest"
    )]
    pub solar_api_base_url: String,

    /// Bearer token for the astronomy API (empty disables auth)
    #[arg(long, env = "SOLAR_API_TOKEN", default_value = "", hide_env_values = true)]
    pub solar_api_token: String,

    /// Data source for the catalog tools
    #[arg(long, env = "CATALOG_SOURCE", value_enum, default_value_t = CatalogSourceKind::Fixture)]
    pub catalog_source: CatalogSourceKind,

    /// Bind host for the HTTP transport
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Bind port for the HTTP transport
    #[arg(long, env = "MCP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// MCP transport
    #[arg(long, env = "MCP_TRANSPORT", value_enum, default_value_t = TransportKind::Stdio)]
    pub transport: TransportKind,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |token: &str| if token.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &redact(&self.api_token))
            .field("solar_api_base_url", &self.solar_api_base_url)
            .field("solar_api_token", &redact(&self.solar_api_token))
            .field("catalog_source", &self.catalog_source)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("transport", &self.transport)
            .finish()
    }
}

impl Config {
    pub fn catalog_transport(&self) -> TransportOptions {
        TransportOptions::new().with_bearer_token(self.api_token.clone())
    }

    pub fn solar_transport(&self) -> TransportOptions {
        TransportOptions::new().with_bearer_token(self.solar_api_token.clone())
    }

    /// Build the configured catalog data provider.
    pub fn catalog_source(&self) -> Result<Arc<dyn CatalogSource>, FetchError> {
        Ok(match self.catalog_source {
            CatalogSourceKind::Fixture => Arc::new(FixtureCatalog::sample()),
            CatalogSourceKind::Remote => {
                let client = RestClient::new(self.api_base_url.clone(), self.catalog_transport())?;
                Arc::new(RemoteCatalog::new(Arc::new(client)))
            }
        })
    }

    pub fn solar_client(&self) -> Result<Arc<dyn Fetch>, FetchError> {
        let client = RestClient::new(self.solar_api_base_url.clone(), self.solar_transport())?;
        Ok(Arc::new(client))
    }

    /// `host:port` for the HTTP transport.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
