//! Aggregation errors.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a batch of ticks could not be turned into bars.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The summed size of one bucket exceeds the `Decimal` range.
    #[error("volume overflow in bucket {bucket}")]
    VolumeOverflow {
        /// Start of the bucket that overflowed.
        bucket: DateTime<Utc>,
    },
}
