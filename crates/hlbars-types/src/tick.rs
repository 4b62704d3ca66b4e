//! Trade tick representation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::TickError;

/// A single executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Execution time of the trade (UTC, millisecond precision).
    pub timestamp: DateTime<Utc>,
    /// Execution price.
    pub price: Decimal,
    /// Traded size.
    pub size: Decimal,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, price: Decimal, size: Decimal) -> Self {
        Self {
            timestamp,
            price,
            size,
        }
    }
}

/// A numeric field as sent on the wire.
///
/// The `recentTrades` endpoint sends prices and sizes as strings, but numbers
/// are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    /// Decimal text, e.g. `"97012.5"`.
    Text(String),
    /// Plain JSON number.
    Number(serde_json::Number),
}

impl RawNumber {
    /// Parses the field into a decimal.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::InvalidNumber`] if the value is not a finite decimal.
    pub fn to_decimal(&self, field: &'static str) -> Result<Decimal, TickError> {
        let text = match self {
            Self::Text(s) => s.trim().to_string(),
            Self::Number(n) => n.to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| TickError::InvalidNumber { field, value: text })
    }
}

impl std::fmt::Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Raw trade record as returned by the `recentTrades` info request.
///
/// Fields the collector does not use (`hash`, `tid`, `users`) are ignored
/// during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrade {
    /// Instrument symbol, if the feed echoes it.
    #[serde(default)]
    pub coin: Option<String>,
    /// Aggressor side (`"B"` or `"A"`), if present.
    #[serde(default)]
    pub side: Option<String>,
    /// Execution price.
    pub px: RawNumber,
    /// Traded size.
    pub sz: RawNumber,
    /// Execution time in milliseconds since the Unix epoch.
    pub time: i64,
}

impl RawTrade {
    /// Creates a raw trade from string fields.
    #[must_use]
    pub fn new(px: impl Into<String>, sz: impl Into<String>, time: i64) -> Self {
        Self {
            coin: None,
            side: None,
            px: RawNumber::Text(px.into()),
            sz: RawNumber::Text(sz.into()),
            time,
        }
    }

    /// Converts the wire record into a validated [`Tick`].
    ///
    /// # Errors
    ///
    /// Fails if the price or size is not a decimal, the size is negative, or
    /// the timestamp is outside the representable range.
    pub fn normalize(&self) -> Result<Tick, TickError> {
        let price = self.px.to_decimal("px")?;
        let size = self.sz.to_decimal("sz")?;
        if size.is_sign_negative() && !size.is_zero() {
            return Err(TickError::NegativeSize(size));
        }
        let timestamp = DateTime::from_timestamp_millis(self.time)
            .ok_or(TickError::InvalidTimestamp(self.time))?;

        Ok(Tick::new(timestamp, price, size))
    }
}
