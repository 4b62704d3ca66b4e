//! Trade source abstraction used by the collector.

use async_trait::async_trait;
use hlbars_types::RawTrade;

use crate::{ClientConfig, FetchError, InfoClient};

/// Something that can return the most recent trades for one instrument.
///
/// No contract is made on completeness or ordering: implementations may
/// return overlapping or unordered windows.
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// Fetches the trades currently visible from the source.
    async fn fetch(&self) -> Result<Vec<RawTrade>, FetchError>;

    /// Instrument symbol this source polls.
    fn coin(&self) -> &str;
}

/// [`TradeSource`] backed by the Hyperliquid `recentTrades` info request.
#[derive(Debug, Clone)]
pub struct HyperliquidSource {
    client: InfoClient,
    coin: String,
}

impl HyperliquidSource {
    /// Creates a source for `coin` using an existing client.
    #[must_use]
    pub fn new(client: InfoClient, coin: impl Into<String>) -> Self {
        Self {
            client,
            coin: coin.into(),
        }
    }

    /// Creates a source for `coin` with a fresh client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(
        config: ClientConfig,
        coin: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(InfoClient::new(config)?, coin))
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &InfoClient {
        &self.client
    }
}

#[async_trait]
impl TradeSource for HyperliquidSource {
    async fn fetch(&self) -> Result<Vec<RawTrade>, FetchError> {
        self.client.recent_trades(&self.coin).await
    }

    fn coin(&self) -> &str {
        &self.coin
    }
}
