// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the bridge REST API.

use std::time::Duration;

use parking_lot::RwLock;
use reqwest::Client;

use crate::error::ProtocolError;
use crate::protocol::{Method, Transport};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for an HTTP bridge connection.
///
/// The address may carry a scheme (`http://` or `https://`) and a port. When
/// no scheme is given HTTPS is used. Bridges ship with a self-signed
/// certificate, so certificate validation is disabled unless turned back on
/// with [`with_accept_invalid_certs`](Self::with_accept_invalid_certs).
///
/// # Examples
///
/// ```
/// use hue_bridge::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.2", "secret-key");
/// assert_eq!(config.base_url(), "https://192.168.1.2/api/secret-key");
///
/// let config = HttpConfig::new("http://bridge.local:8080", "secret-key")
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://bridge.local:8080/api/secret-key");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: Option<u16>,
    use_https: bool,
    key: String,
    timeout: Duration,
    accept_invalid_certs: bool,
}

impl HttpConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the bridge at `address` using API `key`.
    ///
    /// # Arguments
    ///
    /// * `address` - Hostname or IP, optionally with scheme and port
    /// * `key` - The API key (bridge "username")
    #[must_use]
    pub fn new(address: impl AsRef<str>, key: impl Into<String>) -> Self {
        let address = address.as_ref().trim();
        let (use_https, rest) = if let Some(rest) = address.strip_prefix("http://") {
            (false, rest)
        } else if let Some(rest) = address.strip_prefix("https://") {
            (true, rest)
        } else {
            (true, address)
        };
        let authority = rest.split('/').next().unwrap_or_default();
        let (host, port) = split_port(authority);

        Self {
            host: host.to_string(),
            port,
            use_https,
            key: key.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            accept_invalid_certs: true,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Uses HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        self
    }

    /// Uses plain HTTP.
    #[must_use]
    pub fn with_http(mut self) -> Self {
        self.use_https = false;
        self
    }

    /// Sets the per-request timeout. Zero disables the deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets whether certificates that fail validation are accepted.
    #[must_use]
    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the explicit port, if any.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns whether HTTPS is used.
    #[must_use]
    pub fn use_https(&self) -> bool {
        self.use_https
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the API root URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix = self.port.map(|p| format!(":{p}")).unwrap_or_default();
        format!("{scheme}://{}{port_suffix}/api/{}", self.host, self.key)
    }

    /// Creates an `HttpTransport` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the host is empty or
    /// malformed, or `ProtocolError::Http` if the client cannot be created.
    pub fn into_transport(self) -> Result<HttpTransport, ProtocolError> {
        if self.host.is_empty() || self.host.ends_with(':') {
            return Err(ProtocolError::InvalidAddress(self.host));
        }
        let base_url = self.base_url();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ProtocolError::InvalidAddress(format!("{base_url}: {e}")))?;

        let client = Client::builder()
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpTransport {
            base_url,
            client,
            timeout: RwLock::new(self.timeout),
        })
    }
}

/// Splits `host:port`, leaving the authority untouched when the port is not
/// a number.
fn split_port(authority: &str) -> (&str, Option<u16>) {
    let port_start = if authority.starts_with('[') {
        authority.find("]:").map(|i| i + 1)
    } else {
        authority.rfind(':')
    };
    match port_start {
        Some(i) => match authority[i + 1..].parse() {
            Ok(port) => (&authority[..i], Some(port)),
            Err(_) => (authority, None),
        },
        None => (authority, None),
    }
}

// ============================================================================
// HttpTransport - reqwest-backed transport
// ============================================================================

/// HTTP transport for the bridge REST API.
///
/// Each request is bounded by the configured timeout, which may be changed
/// while the transport is in use.
///
/// # Examples
///
/// ```no_run
/// use hue_bridge::protocol::{HttpConfig, Method, Transport};
///
/// # async fn example() -> hue_bridge::Result<()> {
/// let transport = HttpConfig::new("192.168.1.2", "secret-key").into_transport()?;
/// let body = transport.request(Method::Get, "/lights", None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
    timeout: RwLock<Duration>,
}

impl HttpTransport {
    /// Returns the API root URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the current per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        *self.timeout.read()
    }

    /// Changes the per-request timeout. Zero disables the deadline.
    pub fn set_timeout(&self, timeout: Duration) {
        *self.timeout.write() = timeout;
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, ProtocolError> {
        let mut request = match method {
            Method::Get => self.client.get(url),
            Method::Put => self.client.put(url),
        };
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        let response = request.send().await.map_err(ProtocolError::Http)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ProtocolError::AuthenticationFailed);
        }

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response.bytes().await.map_err(ProtocolError::Http)?;
        Ok(bytes.to_vec())
    }
}

impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, ProtocolError> {
        let url = format!("{}{path}", self.base_url);
        let timeout = self.timeout();

        tracing::debug!(%method, path, "Sending HTTP request");

        let bytes = if timeout.is_zero() {
            self.send(method, &url, body).await?
        } else {
            tokio::time::timeout(timeout, self.send(method, &url, body))
                .await
                .map_err(|_| {
                    ProtocolError::Timeout(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX))
                })??
        };

        tracing::debug!(path, size = bytes.len(), "Received HTTP response");

        Ok(bytes)
    }
}
