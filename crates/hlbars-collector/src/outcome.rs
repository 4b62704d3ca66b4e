//! Per-iteration results of the poll loop.

use chrono::{DateTime, Utc};
use hlbars_aggregate::{AggregateError, Ohlcv};
use hlbars_fetch::FetchError;
use hlbars_store::StoreError;
use hlbars_types::TickError;
use std::time::Duration;
use thiserror::Error;

use crate::PollSettings;

/// A fetched batch that cannot be turned into bars.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A trade in the batch could not be normalized.
    #[error(transparent)]
    Tick(#[from] TickError),

    /// The batch could not be aggregated.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

/// Why an iteration was abandoned.
#[derive(Error, Debug)]
pub enum IterationError {
    /// The trade source could not be reached or answered badly.
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),

    /// The batch held malformed or unaggregatable trades.
    #[error("data error: {0}")]
    Data(#[from] DataError),

    /// The bar could not be written.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Result of one fetch → aggregate → decide → persist pass.
#[derive(Debug)]
pub enum IterationOutcome {
    /// A new latest bucket was written and the watermark advanced.
    Persisted(Ohlcv),
    /// The latest bucket is the one already handled.
    Unchanged(DateTime<Utc>),
    /// The feed returned a window whose latest bucket is behind the watermark.
    Stale {
        /// Latest bucket in the fetched window.
        latest: DateTime<Utc>,
        /// Current watermark.
        watermark: DateTime<Utc>,
    },
    /// The source returned no trades.
    Empty,
    /// The iteration failed; nothing was written and the watermark is unchanged.
    Failed(IterationError),
}

impl IterationOutcome {
    /// Returns true if the iteration failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns the persisted bar, if any.
    #[must_use]
    pub const fn persisted(&self) -> Option<&Ohlcv> {
        match self {
            Self::Persisted(bar) => Some(bar),
            _ => None,
        }
    }

    /// Returns how long to sleep before the next iteration.
    #[must_use]
    pub const fn next_delay(&self, settings: &PollSettings) -> Duration {
        if self.is_failure() {
            settings.recovery_delay
        } else {
            settings.poll_interval
        }
    }
}

/// Counters accumulated over a collector run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Completed iterations.
    pub iterations: u64,
    /// Bars written.
    pub persisted: u64,
    /// Failed iterations.
    pub failures: u64,
}

impl From<TickError> for IterationError {
    fn from(err: TickError) -> Self {
        Self::Data(err.into())
    }
}

impl From<AggregateError> for IterationError {
    fn from(err: AggregateError) -> Self {
        Self::Data(err.into())
    }
}

impl RunStats {
    /// Creates zeroed counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            iterations: 0,
            persisted: 0,
            failures: 0,
        }
    }

    /// Counts one finished iteration.
    pub const fn record(&mut self, outcome: &IterationOutcome) {
        self.iterations += 1;
        match outcome {
            IterationOutcome::Persisted(_) => self.persisted += 1,
            IterationOutcome::Failed(_) => self.failures += 1,
            _ => {}
        }
    }
}
