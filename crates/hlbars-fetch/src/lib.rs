//! HTTP client and trade fetching for the hlbars collector.
//!
//! This crate provides the trade source side of the pipeline:
//!
//! - [`request::InfoRequest`] - Info endpoint request bodies
//! - [`InfoClient`] - HTTP client for the info endpoint
//! - [`TradeSource`] - Abstraction the collector polls, with [`HyperliquidSource`]
//! - [`normalize_trades`] - All-or-nothing conversion of raw trades into ticks

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod parse;
pub mod request;
mod source;

pub use client::{ClientConfig, FetchError, InfoClient};
pub use parse::{normalize_trades, parse_trades};
pub use source::{HyperliquidSource, TradeSource};
