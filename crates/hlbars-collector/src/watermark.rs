//! Watermark tracking and the new-bar decision rule.

use chrono::{DateTime, Utc};
use hlbars_aggregate::Ohlcv;

/// What to do with a freshly aggregated bar table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The latest bucket has not been handled yet; persist this bar.
    New(Ohlcv),
    /// The latest bucket equals the watermark.
    Current(DateTime<Utc>),
    /// The latest bucket is older than the watermark.
    Stale {
        /// Latest bucket in the table.
        latest: DateTime<Utc>,
        /// Current watermark.
        watermark: DateTime<Utc>,
    },
    /// The table has no bars.
    Empty,
}

/// Bucket start of the last bar the collector considers handled.
///
/// Starts empty, so the first aggregated bucket is always new. Only moves
/// forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Watermark(Option<DateTime<Utc>>);

impl Watermark {
    /// Creates an empty watermark.
    #[must_use]
    pub const fn new() -> Self {
        Self(None)
    }

    /// Creates a watermark positioned at `bucket`.
    #[must_use]
    pub const fn at(bucket: DateTime<Utc>) -> Self {
        Self(Some(bucket))
    }

    /// Returns the current position, if any.
    #[must_use]
    pub const fn get(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// Decides whether the last bar of `bars` is new.
    ///
    /// Only the latest bucket is examined. Earlier buckets in the same table
    /// are assumed to have been persisted by previous iterations.
    #[must_use]
    pub fn decide(&self, bars: &[Ohlcv]) -> Decision {
        let Some(latest) = bars.last() else {
            return Decision::Empty;
        };

        match self.0 {
            None => Decision::New(*latest),
            Some(mark) if latest.timestamp > mark => Decision::New(*latest),
            Some(mark) if latest.timestamp == mark => Decision::Current(mark),
            Some(mark) => Decision::Stale {
                latest: latest.timestamp,
                watermark: mark,
            },
        }
    }

    /// Moves the watermark to `bucket`.
    ///
    /// Returns `false` and leaves the watermark unchanged if `bucket` is not
    /// ahead of the current position.
    pub fn advance(&mut self, bucket: DateTime<Utc>) -> bool {
        match self.0 {
            Some(mark) if bucket <= mark => false,
            _ => {
                self.0 = Some(bucket);
                true
            }
        }
    }
}
