//! Trade batch normalization.

use hlbars_types::{RawTrade, Tick, TickError};

/// Parses a `recentTrades` response body into raw trade records.
///
/// # Errors
///
/// Returns an error if the body is not a JSON array of trade objects.
pub fn parse_trades(body: &[u8]) -> Result<Vec<RawTrade>, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Normalizes a whole batch of raw trades.
///
/// The batch is all-or-nothing: the first malformed trade fails the call and
/// no ticks are returned, so a bad record can never produce a partial bar.
///
/// # Errors
///
/// Returns the [`TickError`] of the first trade that fails to normalize.
pub fn normalize_trades(trades: &[RawTrade]) -> Result<Vec<Tick>, TickError> {
    trades.iter().map(RawTrade::normalize).collect()
}
