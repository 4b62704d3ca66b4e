//! HTTP client for the Hyperliquid info endpoint.

use bytes::Bytes;
use hlbars_types::RawTrade;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use thiserror::Error;

use crate::parse::parse_trades;
use crate::request::{DEFAULT_BASE_URL, InfoRequest};

/// Configuration for the info client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Info endpoint URL.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout (separate from the request timeout).
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
            user_agent: format!("hlbars/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Returns a copy of this configuration pointing at `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Errors that can occur while fetching trades.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("Server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response body was not a trade list.
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// HTTP client for info requests.
///
/// The client does not retry: a failed request is reported once and the
/// caller decides when to try again.
#[derive(Debug, Clone)]
pub struct InfoClient {
    client: Client,
    config: ClientConfig,
}

impl InfoClient {
    /// Creates a new info client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            // One long-lived connection is reused across polls
            .pool_max_idle_per_host(1)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetches the most recent trades for `coin`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a body
    /// that is not a list of trades.
    pub async fn recent_trades(&self, coin: &str) -> Result<Vec<RawTrade>, FetchError> {
        let body = self.post(&InfoRequest::recent_trades(coin)).await?;
        Ok(parse_trades(&body)?)
    }

    /// Posts an info request and returns the raw response body.
    async fn post(&self, request: &InfoRequest) -> Result<Bytes, FetchError> {
        let payload = serde_json::to_vec(request)?;
        let response = self
            .client
            .post(&self.config.base_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?)
    }
}
