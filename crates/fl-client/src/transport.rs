//! Raw HTTP transport.
//!
//! The transport performs exactly one HTTP exchange and hands back the raw
//! status/body/header triple. Payload interpretation happens one layer up in
//! [`crate::interpret`]; network-level failures (DNS, connection reset,
//! timeout) propagate as their own error kinds and are never reclassified as
//! remote-call errors.

use std::collections::HashMap;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::interpret::HttpMethod;

/// A raw HTTP response: status, body text, and response headers
/// (header names lowercased for case-insensitive lookup).
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
    /// Response headers, names lowercased.
    pub headers: HashMap<String, String>,
}

impl RawResponse {
    /// Get a header value by (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// HTTP transport for Salesforce APIs.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    /// Create a new transport with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new transport with default configuration.
    pub fn default_transport() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the transport configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a single HTTP exchange.
    ///
    /// The body and headers are passed through untouched; the response body
    /// is returned as text without interpretation.
    pub async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
        headers: &[(String, String)],
    ) -> Result<RawResponse> {
        debug!(%url, method = %method, "sending request");

        let url = url::Url::parse(url)
            .map_err(|e| Error::with_source(ErrorKind::Config(format!("invalid url: {e}")), e))?;
        let mut request = self.inner.request(method.to_reqwest(), url);

        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;

        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            body,
            headers: response_headers,
        })
    }
}
