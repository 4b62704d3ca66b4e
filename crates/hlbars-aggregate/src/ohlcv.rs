//! OHLCV (candlestick) data structure.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Text layout of a bar's bucket key, always in UTC.
pub const BUCKET_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One-second OHLCV bar (candlestick) data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Bucket start, truncated to the whole second.
    pub timestamp: DateTime<Utc>,
    /// Price of the first trade received for the bucket.
    pub open: Decimal,
    /// Highest price during the bucket.
    pub high: Decimal,
    /// Lowest price during the bucket.
    pub low: Decimal,
    /// Price of the last trade received for the bucket.
    pub close: Decimal,
    /// Sum of traded sizes.
    pub volume: Decimal,
}

impl Ohlcv {
    /// Creates a new OHLCV bar.
    #[must_use]
    pub const fn new(
        timestamp: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the canonical bucket key, e.g. `2024-01-01 00:00:05`.
    #[must_use]
    pub fn bucket_key(&self) -> String {
        self.timestamp.format(BUCKET_FORMAT).to_string()
    }

    /// Parses a canonical bucket key back into a UTC timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` does not match [`BUCKET_FORMAT`].
    pub fn parse_bucket_key(key: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(key, BUCKET_FORMAT).map(|naive| naive.and_utc())
    }
}

/// Operator-facing confirmation line: prices to 2 decimals, volume to 4.
impl std::fmt::Display for Ohlcv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] O={:.2} H={:.2} L={:.2} C={:.2} V={:.4}",
            self.bucket_key(),
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume
        )
    }
}
