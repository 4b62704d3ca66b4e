//! Hyperliquid info request bodies.

use serde::Serialize;

/// Default endpoint for Hyperliquid info requests.
pub const DEFAULT_BASE_URL: &str = "https://api.hyperliquid.xyz/info";

/// Body of a POST to the info endpoint.
///
/// # Example
///
/// ```
/// use hlbars_fetch::request::InfoRequest;
///
/// let body = serde_json::to_string(&InfoRequest::recent_trades("BTC")).unwrap();
/// assert_eq!(body, r#"{"type":"recentTrades","coin":"BTC"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InfoRequest {
    /// Most recent trades for one coin.
    RecentTrades {
        /// Instrument symbol, e.g. `BTC`.
        coin: String,
    },
}

impl InfoRequest {
    /// Builds a `recentTrades` request for `coin`.
    #[must_use]
    pub fn recent_trades(coin: impl Into<String>) -> Self {
        Self::RecentTrades { coin: coin.into() }
    }
}
