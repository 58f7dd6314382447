//! # restmcp - MCP tools over REST APIs
//!
//! Exposes a record catalog and the Solar System OpenData API as MCP tools.
//! Every tool call is one stateless round trip:
//!
//! parameters → [`normalize`] → [`query::Query`] → [`client::Fetch`] →
//! [`render`] (or [`error::ErrorCatalog`] on failure) → one string.
//!
//! ## Core Types
//!
//! - **`Fetch`**: one `GET` against a REST API. [`http::RestClient`] is the reqwest implementation.
//! - **`Query`**: filter, sort and pagination encoded in the API's query grammar.
//! - **`CatalogSource`**: data provider for the catalog tools (fixture or remote).
//! - **`Record`**: read-only view over a JSON record with one presence rule.
//! - **`Envelope`**: JSON wrapper for a non-empty page of records.
//! - **`RestToolServer`**: the rmcp `ServerHandler` wiring it all up.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use restmcp::http::RestClient;
//! use restmcp::options::TransportOptions;
//! use restmcp::provider::FixtureCatalog;
//! use restmcp::server::RestToolServer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let solar = RestClient::new(
//!     "https://api.le-systeme-solaire.net/rest",
//!     TransportOptions::new(),
//! )?;
//! let server = RestToolServer::new(Arc::new(FixtureCatalog::sample()), Arc::new(solar));
//! # let _ = server;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod normalize;
pub mod options;
pub mod provider;
pub mod query;
pub mod record;
pub mod render;
pub mod server;
pub mod tools;

pub use client::{Fetch, FetchError};
pub use format::ResponseFormat;
pub use provider::{CatalogSource, FixtureCatalog, RemoteCatalog};
pub use query::Query;
pub use server::RestToolServer;

pub use rmcp;
