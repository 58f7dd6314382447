//! Transport configuration for outbound API requests.

use std::collections::HashMap;
use std::time::Duration;

/// Fixed per-request timeout applied to every outbound call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport configuration options.
///
/// Controls how requests are sent over the network.
#[derive(Clone)]
pub enum TransportOptions {
    /// HTTP transport configuration
    Http {
        /// Request timeout.
        timeout: Duration,
        /// Bearer token sent as `Authorization`. Empty tokens are treated as absent.
        bearer_token: Option<String>,
        /// Additional HTTP headers to send with every request.
        headers: Option<HashMap<String, String>>,
    },
}

impl Default for TransportOptions {
    fn default() -> Self {
        TransportOptions::Http {
            timeout: DEFAULT_TIMEOUT,
            bearer_token: None,
            headers: None,
        }
    }
}

impl std::fmt::Debug for TransportOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportOptions::Http {
                timeout,
                bearer_token,
                headers,
            } => f
                .debug_struct("Http")
                .field("timeout", timeout)
                .field("bearer_token", &bearer_token.as_ref().map(|_| "<redacted>"))
                .field("headers", headers)
                .finish(),
        }
    }
}

impl TransportOptions {
    /// Create new default HTTP transport options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, duration: Duration) -> Self {
        match &mut self {
            TransportOptions::Http { timeout, .. } => *timeout = duration,
        }
        self
    }

    /// Set the bearer token. Blank tokens leave authentication off.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        match &mut self {
            TransportOptions::Http { bearer_token, .. } => {
                *bearer_token = if token.trim().is_empty() {
                    None
                } else {
                    Some(token)
                };
            }
        }
        self
    }

    /// Add a header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        match &mut self {
            TransportOptions::Http { headers, .. } => {
                headers.get_or_insert_with(HashMap::new).insert(key, value);
            }
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        match self {
            TransportOptions::Http { timeout, .. } => *timeout,
        }
    }

    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            TransportOptions::Http { bearer_token, .. } => bearer_token.as_deref(),
        }
    }
}
