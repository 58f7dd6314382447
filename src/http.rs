//! HTTP client utilities for making requests to the remote REST APIs.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;

use crate::client::{Fetch, FetchError};
use crate::options::TransportOptions;
use crate::query::Query;

/// Build a configured HTTP client from transport options.
pub fn build_http_client(transport_options: &TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    match transport_options {
        TransportOptions::Http { timeout, .. } => {
            builder = builder.timeout(*timeout);
        }
    }

    builder.build()
}

/// Attach the fixed header set plus any extra headers from transport options.
pub fn add_headers(mut request: RequestBuilder, transport_options: &TransportOptions) -> RequestBuilder {
    request = request.header(CONTENT_TYPE, "application/json");

    match transport_options {
        TransportOptions::Http {
            bearer_token,
            headers,
            ..
        } => {
            if let Some(token) = bearer_token {
                request = request.header(AUTHORIZATION, format!("Bearer {}", token));
            }
            if let Some(h) = headers {
                for (key, value) in h {
                    request = request.header(key, value);
                }
            }
        }
    }
    request
}

/// Extension trait for Response that logs response body.
#[async_trait]
pub trait ResponseExt {
    /// Get response text and log it. Consumes the response.
    async fn text_logged(self) -> Result<String, reqwest::Error>;

    /// Parse response as JSON and log it. Consumes the response.
    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, FetchError>;
}

#[async_trait]
impl ResponseExt for reqwest::Response {
    async fn text_logged(self) -> Result<String, reqwest::Error> {
        let text = self.text().await?;
        tracing::debug!("API response ({} bytes):\n{}", text.len(), text);
        Ok(text)
    }

    async fn json_logged<T: serde::de::DeserializeOwned>(self) -> Result<T, FetchError> {
        let bytes = self.bytes().await?;

        if let Ok(text) = std::str::from_utf8(&bytes) {
            tracing::debug!("API response ({} bytes):\n{}", text.len(), text);
        }

        serde_json::from_slice(&bytes).map_err(FetchError::from)
    }
}

/// REST client for one API family: a base URL plus transport options.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    base: Url,
    transport_options: TransportOptions,
    http: Client,
}

impl RestClient {
    /// Create a new client. Trailing slashes on the base URL are ignored.
    pub fn new(
        base_url: impl Into<String>,
        transport_options: TransportOptions,
    ) -> Result<Self, FetchError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| FetchError::Request(format!("invalid base URL {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::Request(format!("base URL {} cannot carry a path", base_url)));
        }
        let http = build_http_client(&transport_options)?;
        Ok(Self {
            base_url,
            base,
            transport_options,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport_options
    }

    /// Append `path` to the base URL, one escaped segment per element.
    pub fn url(&self, path: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url
    }
}

#[async_trait]
impl Fetch for RestClient {
    async fn get(&self, path: &[&str], query: &Query) -> Result<Value, FetchError> {
        let url = self.url(path);
        let pairs = query.to_pairs();
        tracing::debug!(url = %url, params = ?pairs, "GET");

        let mut req = self.http.get(url.clone());
        req = add_headers(req, &self.transport_options);
        if !pairs.is_empty() {
            req = req.query(&pairs);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text_logged().await.unwrap_or_default();
            tracing::warn!(url = %url, status = status.as_u16(), "API request failed");
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json_logged().await
    }
}
