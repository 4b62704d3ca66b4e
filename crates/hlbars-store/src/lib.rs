//! Durable one-second bar storage for the hlbars collector.
//!
//! - [`BarStore`] - Keyed upsert and ordered scan
//! - [`SqliteBarStore`] - SQLite implementation (table `kline_1s`)

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod sqlite;

pub use error::{Result, StoreError};
pub use sqlite::{SqliteBarStore, TABLE_NAME};

use hlbars_aggregate::Ohlcv;

/// Durable table of bars keyed by bucket start.
pub trait BarStore {
    /// Inserts `bar`, or fully replaces the row with the same bucket key.
    ///
    /// The write is committed before this returns.
    ///
    /// # Errors
    ///
    /// Returns an error if the write did not happen.
    fn upsert(&mut self, bar: &Ohlcv) -> Result<()>;

    /// Returns every stored bar ordered by bucket start.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read or holds a corrupt row.
    fn scan_all(&self) -> Result<Vec<Ohlcv>>;
}
