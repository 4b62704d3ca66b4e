//! Collect Hyperliquid trades into one-second OHLCV bars stored in SQLite.
//!
//! This is a facade crate that re-exports functionality from the hlbars
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use hlbars_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CollectorConfig::load(std::path::Path::new(DEFAULT_CONFIG_PATH));
//!     let source = HyperliquidSource::with_config(
//!         ClientConfig::default().with_base_url(config.base_url.clone()),
//!         config.coin.clone(),
//!     )?;
//!     let store = SqliteBarStore::open(&config.db_path)?;
//!
//!     let collector = Collector::new(source, store, config.poll_settings());
//!     let stats = collector
//!         .run(async {
//!             let _ = tokio::signal::ctrl_c().await;
//!         })
//!         .await;
//!     println!("persisted {} bars", stats.persisted);
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use hlbars_types::*;

// Re-export aggregation
pub use hlbars_aggregate::{
    AggregateError, BUCKET_FORMAT, Ohlcv, aggregate_ticks, truncate_to_second,
};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use hlbars_fetch::{
    ClientConfig, FetchError, HyperliquidSource, InfoClient, TradeSource, normalize_trades,
    parse_trades,
};

// Re-export storage
#[cfg(feature = "store")]
pub use hlbars_store::{BarStore, SqliteBarStore, StoreError};

// Re-export formatters
#[cfg(feature = "format")]
pub use hlbars_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat, ReportOptions,
    TableFormatter,
};

// Re-export the poll loop
#[cfg(feature = "collector")]
pub use hlbars_collector::{
    Collector, CollectorConfig, ConfigError, DataError, IterationError, IterationOutcome,
    PollSettings, RunStats, Watermark,
};

/// Prelude module for convenient imports.
///
/// ```
/// use hlbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use hlbars_types::{RawTrade, Tick, TickError};

    pub use hlbars_aggregate::{Ohlcv, aggregate_ticks};

    #[cfg(feature = "fetch")]
    pub use hlbars_fetch::{ClientConfig, HyperliquidSource, TradeSource};

    #[cfg(feature = "store")]
    pub use hlbars_store::{BarStore, SqliteBarStore};

    #[cfg(feature = "format")]
    pub use hlbars_format::{Formatter, OutputFormat, ReportOptions};

    #[cfg(feature = "collector")]
    pub use hlbars_collector::{
        Collector, CollectorConfig, DEFAULT_CONFIG_PATH, IterationOutcome, PollSettings,
        RunStats,
    };
}
