//! OHLCV aggregation for the hlbars one-second bar collector.
//!
//! This crate provides tick-to-OHLCV (candlestick) aggregation:
//!
//! - [`Ohlcv`] - One-second OHLCV bar
//! - [`aggregate_ticks`] - Recomputes every bar present in a tick batch

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod error;
mod ohlcv;

pub use aggregator::{aggregate_ticks, truncate_to_second};
pub use error::AggregateError;
pub use ohlcv::{BUCKET_FORMAT, Ohlcv};
