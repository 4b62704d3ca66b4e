//! Core types for the hlbars one-second bar collector.
//!
//! This crate provides the fundamental data structures used throughout hlbars:
//!
//! - [`Tick`] - A single executed trade with price, size and timestamp
//! - [`RawTrade`] - Trade record as sent by the `recentTrades` endpoint
//! - [`TickError`] - Why a raw trade could not be normalized

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod tick;

pub use error::TickError;
pub use tick::{RawNumber, RawTrade, Tick};
