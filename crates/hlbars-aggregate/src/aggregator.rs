//! Batch tick-to-OHLCV aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use hlbars_types::Tick;
use rust_decimal::Decimal;

use crate::{AggregateError, Ohlcv};

/// Aggregates a batch of ticks into one-second OHLCV bars.
///
/// The result holds one bar per distinct second present in `ticks`, ordered
/// by bucket start. Seconds without ticks produce no bar. Open and close follow
/// the order in which ticks appear in the slice, not their timestamps, so the
/// output for a given batch is always the same.
///
/// An empty batch yields an empty vector.
///
/// # Errors
///
/// Returns [`AggregateError::VolumeOverflow`] if the summed size of a bucket
/// does not fit in a `Decimal`.
pub fn aggregate_ticks(ticks: &[Tick]) -> Result<Vec<Ohlcv>, AggregateError> {
    let mut buckets: BTreeMap<DateTime<Utc>, OhlcvBuilder> = BTreeMap::new();

    for tick in ticks {
        let bucket = truncate_to_second(tick.timestamp);
        match buckets.get_mut(&bucket) {
            Some(builder) => builder.update(tick)?,
            None => {
                buckets.insert(bucket, OhlcvBuilder::new(bucket, tick));
            }
        }
    }

    Ok(buckets.into_values().map(OhlcvBuilder::finish).collect())
}

/// Truncates a timestamp to the start of its second.
#[must_use]
pub fn truncate_to_second(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(0)
}

/// Builder for OHLCV bars.
#[derive(Debug)]
struct OhlcvBuilder {
    timestamp: DateTime<Utc>,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
}

impl OhlcvBuilder {
    /// Creates a new builder from the first tick.
    const fn new(timestamp: DateTime<Utc>, tick: &Tick) -> Self {
        Self {
            timestamp,
            open: tick.price,
            high: tick.price,
            low: tick.price,
            close: tick.price,
            volume: tick.size,
        }
    }

    /// Updates the builder with a new tick. Leaves it unchanged on overflow.
    fn update(&mut self, tick: &Tick) -> Result<(), AggregateError> {
        self.volume = self
            .volume
            .checked_add(tick.size)
            .ok_or(AggregateError::VolumeOverflow {
                bucket: self.timestamp,
            })?;
        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        self.close = tick.price;
        Ok(())
    }

    /// Finishes building and returns the OHLCV bar.
    const fn finish(self) -> Ohlcv {
        Ohlcv::new(
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone, Timelike};
    use rust_decimal_macros::dec;

    fn make_tick(second: u32, millis: u32, price: Decimal, size: Decimal) -> Tick {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, second).unwrap()
            + TimeDelta::milliseconds(i64::from(millis));
        Tick::new(timestamp, price, size)
    }

    #[test]
    fn test_single_bucket_scenario() {
        let ticks = [
            make_tick(0, 100, dec!(100), dec!(1)),
            make_tick(0, 400, dec!(105), dec!(2)),
            make_tick(0, 900, dec!(95), dec!(1)),
        ];

        let bars = aggregate_ticks(&ticks).unwrap();
        assert_eq!(bars.len(), 1);

        let bar = bars[0];
        assert_eq!(bar.bucket_key(), "2024-01-01 00:00:00");
        assert_eq!(bar.open, dec!(100));
        assert_eq!(bar.high, dec!(105));
        assert_eq!(bar.low, dec!(95));
        assert_eq!(bar.close, dec!(95));
        assert_eq!(bar.volume, dec!(4));
    }

    #[test]
    fn test_empty_batch() {
        assert!(aggregate_ticks(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_tick_bucket() {
        let bars = aggregate_ticks(&[make_tick(3, 0, dec!(42.5), dec!(0.3))]).unwrap();
        assert_eq!(bars.len(), 1);

        let bar = bars[0];
        assert_eq!(bar.open, dec!(42.5));
        assert_eq!(bar.high, dec!(42.5));
        assert_eq!(bar.low, dec!(42.5));
        assert_eq!(bar.close, dec!(42.5));
        assert_eq!(bar.volume, dec!(0.3));
    }

    #[test]
    fn test_unordered_batch_is_sparse_and_sorted() {
        let ticks = [
            make_tick(7, 10, dec!(101), dec!(1)),
            make_tick(2, 500, dec!(99), dec!(1)),
            make_tick(7, 5, dec!(103), dec!(2)),
            make_tick(2, 100, dec!(98), dec!(3)),
        ];

        let bars = aggregate_ticks(&ticks).unwrap();
        let seconds: Vec<_> = bars.iter().map(|b| b.timestamp.second()).collect();
        assert_eq!(seconds, vec![2, 7]);

        // Open and close follow arrival order, not timestamp order.
        assert_eq!(bars[0].open, dec!(99));
        assert_eq!(bars[0].close, dec!(98));
        assert_eq!(bars[1].open, dec!(101));
        assert_eq!(bars[1].close, dec!(103));
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let ticks: Vec<_> = (0..50u32)
            .map(|i| make_tick(i % 5, i * 13 % 1000, Decimal::from(100 + i % 7), dec!(0.1)))
            .collect();

        assert_eq!(aggregate_ticks(&ticks).unwrap(), aggregate_ticks(&ticks).unwrap());
    }

    #[test]
    fn test_bar_invariants() {
        let ticks: Vec<_> = (0..60u32)
            .map(|i| {
                let price = Decimal::from(1000 + (i * 37) % 23) / dec!(10);
                let size = Decimal::from(1 + i % 4) / dec!(100);
                make_tick(i % 6, (i * 71) % 1000, price, size)
            })
            .collect();

        for bar in aggregate_ticks(&ticks).unwrap() {
            assert!(bar.low <= bar.open.min(bar.close));
            assert!(bar.high >= bar.open.max(bar.close));
            assert!(bar.low <= bar.high);

            let expected: Decimal = ticks
                .iter()
                .filter(|t| truncate_to_second(t.timestamp) == bar.timestamp)
                .map(|t| t.size)
                .sum();
            assert_eq!(bar.volume, expected);
        }
    }

    #[test]
    fn test_duplicate_ticks_count_twice() {
        let tick = make_tick(1, 0, dec!(10), dec!(1));
        let bars = aggregate_ticks(&[tick, tick]).unwrap();
        assert_eq!(bars[0].volume, dec!(2));
    }

    #[test]
    fn test_volume_overflow_is_an_error() {
        let ticks = [
            make_tick(0, 0, dec!(100), Decimal::MAX),
            make_tick(0, 500, dec!(101), Decimal::MAX),
        ];

        let err = aggregate_ticks(&ticks).unwrap_err();
        assert_eq!(
            err,
            AggregateError::VolumeOverflow {
                bucket: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_large_volumes_in_separate_buckets() {
        let ticks = [
            make_tick(0, 0, dec!(100), Decimal::MAX),
            make_tick(1, 0, dec!(101), Decimal::MAX),
        ];

        let bars = aggregate_ticks(&ticks).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].volume, Decimal::MAX);
    }

    #[test]
    fn test_truncate_to_second() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 14, 37, 45).unwrap()
            + TimeDelta::milliseconds(999);
        let truncated = truncate_to_second(dt);

        assert_eq!(truncated.second(), 45);
        assert_eq!(truncated.nanosecond(), 0);
    }
}
