//! The poll loop.
//!
//! Each iteration walks `FETCHING → AGGREGATING → DECIDING → (PERSISTING |
//! IDLE) → SLEEPING`. Failures are returned as values and only change the
//! length of the following sleep; the loop itself ends only when the shutdown
//! future completes.

use hlbars_aggregate::aggregate_ticks;
use hlbars_fetch::{TradeSource, normalize_trades};
use hlbars_store::BarStore;
use std::future::Future;
use tracing::{debug, error, info, trace, warn};

use crate::{Decision, IterationError, IterationOutcome, PollSettings, RunStats, Watermark};

/// Polls a trade source and persists each new latest one-second bar.
///
/// The collector owns the watermark and the store handle; dropping it
/// releases the database connection.
#[derive(Debug)]
pub struct Collector<S, B> {
    source: S,
    store: B,
    watermark: Watermark,
    settings: PollSettings,
    stats: RunStats,
}

impl<S: TradeSource, B: BarStore> Collector<S, B> {
    /// Creates a collector with an empty watermark.
    #[must_use]
    pub const fn new(source: S, store: B, settings: PollSettings) -> Self {
        Self::with_watermark(source, store, settings, Watermark::new())
    }

    /// Creates a collector starting from an explicit watermark.
    #[must_use]
    pub const fn with_watermark(
        source: S,
        store: B,
        settings: PollSettings,
        watermark: Watermark,
    ) -> Self {
        Self {
            source,
            store,
            watermark,
            settings,
            stats: RunStats::new(),
        }
    }

    /// Returns the current watermark.
    #[must_use]
    pub const fn watermark(&self) -> Watermark {
        self.watermark
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &B {
        &self.store
    }

    /// Returns the counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> RunStats {
        self.stats
    }

    /// Runs a single iteration without sleeping.
    pub async fn poll_once(&mut self) -> IterationOutcome {
        let outcome = self.try_poll().await.unwrap_or_else(IterationOutcome::Failed);
        self.stats.record(&outcome);
        outcome
    }

    async fn try_poll(&mut self) -> Result<IterationOutcome, IterationError> {
        let trades = self.source.fetch().await?;

        let ticks = normalize_trades(&trades)?;
        let bars = aggregate_ticks(&ticks)?;
        trace!(trades = trades.len(), bars = bars.len(), "aggregated window");

        match self.watermark.decide(&bars) {
            Decision::Empty => Ok(IterationOutcome::Empty),
            Decision::Current(bucket) => Ok(IterationOutcome::Unchanged(bucket)),
            Decision::Stale { latest, watermark } => {
                Ok(IterationOutcome::Stale { latest, watermark })
            }
            Decision::New(bar) => {
                // The watermark only moves once the write is confirmed.
                self.store.upsert(&bar)?;
                self.watermark.advance(bar.timestamp);
                Ok(IterationOutcome::Persisted(bar))
            }
        }
    }

    /// Polls until `shutdown` completes, then returns the run counters.
    ///
    /// `shutdown` is raced against the fetch and both sleeps, so a stop
    /// request is honored without waiting for the next tick. Store writes are
    /// synchronous and are never interrupted.
    pub async fn run<F>(mut self, shutdown: F) -> RunStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            coin = self.source.coin(),
            interval = ?self.settings.poll_interval,
            "collector started"
        );

        loop {
            let outcome = tokio::select! {
                () = &mut shutdown => break,
                outcome = self.poll_once() => outcome,
            };

            report(&outcome, &self.settings);
            let delay = outcome.next_delay(&self.settings);

            tokio::select! {
                () = &mut shutdown => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        info!(
            iterations = self.stats.iterations,
            persisted = self.stats.persisted,
            failures = self.stats.failures,
            "collector stopped"
        );
        self.stats
    }
}

fn report(outcome: &IterationOutcome, settings: &PollSettings) {
    match outcome {
        IterationOutcome::Persisted(bar) => info!("{bar}"),
        IterationOutcome::Unchanged(bucket) => trace!(%bucket, "latest bucket already handled"),
        IterationOutcome::Stale { latest, watermark } => {
            debug!(%latest, %watermark, "fetched window is behind the watermark");
        }
        IterationOutcome::Empty => debug!("no trades returned"),
        IterationOutcome::Failed(err @ IterationError::Storage(_)) => {
            error!(error = %err, retry_in = ?settings.recovery_delay, "iteration failed");
        }
        IterationOutcome::Failed(err) => {
            warn!(error = %err, retry_in = ?settings.recovery_delay, "iteration failed");
        }
    }
}
