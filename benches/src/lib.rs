//! Synthetic trade windows for the hlbars benchmarks.

use chrono::{DateTime, Duration, TimeZone, Utc};
use hlbars_types::{RawTrade, Tick};
use rust_decimal::Decimal;

/// Shape of a generated recent-trades window.
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Number of trades in the window.
    pub trades: usize,
    /// Number of distinct one-second buckets the trades spread over.
    pub seconds: usize,
    /// Whether to shuffle arrival order across buckets.
    pub shuffled: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            trades: 500,
            seconds: 60,
            shuffled: false,
        }
    }
}

/// Start of every generated window, 2024-01-01 00:00:00 UTC.
pub fn window_start() -> DateTime<Utc> {
    Utc.timestamp_opt(1_704_067_200, 0).single().unwrap_or_default()
}

/// Generates a deterministic window of ticks.
///
/// Prices walk around 42 000 in cent steps, sizes cycle through a few lot
/// sizes. The same config always yields the same ticks.
pub fn synthetic_ticks(config: WindowConfig) -> Vec<Tick> {
    let start = window_start();
    let seconds = config.seconds.max(1);
    let per_second = config.trades.div_ceil(seconds).max(1);
    let mut state: u64 = 0x2545_f491_4f6c_dd1d;

    let mut ticks: Vec<Tick> = (0..config.trades)
        .map(|i| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;

            let second = (i / per_second) as i64;
            let millis = (state % 1000) as i64;
            let timestamp = start + Duration::seconds(second) + Duration::milliseconds(millis);

            let cents = (state % 2001) as i64 - 1000;
            let price = Decimal::new(4_200_000 + cents, 2);
            let size = Decimal::new([1, 5, 25, 100][i % 4], 3);
            Tick::new(timestamp, price, size)
        })
        .collect();

    if config.shuffled {
        // Deterministic interleave: odd positions first, then even.
        let (odd, even): (Vec<_>, Vec<_>) = ticks
            .into_iter()
            .enumerate()
            .partition(|(i, _)| i % 2 == 1);
        ticks = odd.into_iter().chain(even).map(|(_, t)| t).collect();
    }

    ticks
}

/// Generates the same window as wire records, for benchmarking normalization.
pub fn synthetic_trades(config: WindowConfig) -> Vec<RawTrade> {
    synthetic_ticks(config)
        .into_iter()
        .map(|t| {
            RawTrade::new(
                t.price.to_string(),
                t.size.to_string(),
                t.timestamp.timestamp_millis(),
            )
        })
        .collect()
}
