//! Core fetch trait and transport fault types.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::query::Query;

/// Faults raised while talking to a remote API.
///
/// Every variant is terminal for the tool call that produced it; the tool
/// boundary turns it into a user-facing string via [`crate::error::ErrorCatalog`].
#[derive(Error, Debug, PartialEq)]
pub enum FetchError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Decode(String),

    #[error("{0}")]
    Request(String),
}

impl FetchError {
    /// Short name of the fault category, used by the fallback error message.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "HTTPStatusError",
            FetchError::Timeout => "TimeoutError",
            FetchError::Connect(_) => "ConnectError",
            FetchError::Decode(_) => "DecodeError",
            FetchError::Request(_) => "RequestError",
        }
    }

    /// HTTP status code, if the fault came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// A single JSON round trip against a remote API.
///
/// Implemented by [`crate::http::RestClient`] for real traffic; tests provide
/// canned implementations.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET `{base}/{path...}` with the encoded query and return the parsed body.
    ///
    /// Each element of `path` is one URL path segment. Implementations must
    /// escape segments so that `/`, `?` and `#` inside an id stay inside it.
    async fn get(&self, path: &[&str], query: &Query) -> Result<Value, FetchError>;
}
