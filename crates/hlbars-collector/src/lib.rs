//! Poll loop for the hlbars collector.
//!
//! - [`CollectorConfig`] - YAML configuration with per-key fallback
//! - [`Watermark`] - Latest handled bucket and the new-bar decision
//! - [`Collector`] - Fetch, aggregate, decide and persist on a fixed cadence
//! - [`IterationOutcome`] - What a single iteration did

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod collector;
mod config;
mod outcome;
mod watermark;

pub use collector::Collector;
pub use config::{
    CollectorConfig, ConfigError, DEFAULT_COIN, DEFAULT_CONFIG_PATH, DEFAULT_DB_PATH,
    DEFAULT_INTERVAL_PULL_MS, PollSettings, RECOVERY_DELAY,
};
pub use outcome::{DataError, IterationError, IterationOutcome, RunStats};
pub use watermark::{Decision, Watermark};
