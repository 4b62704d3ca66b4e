//! Report formatters for stored one-second bars.
//!
//! - [`TableFormatter`] - Human-readable confirmation lines
//! - [`CsvFormatter`] - CSV or TSV with a header row
//! - [`JsonFormatter`] - JSON array or NDJSON

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hlbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod table;

pub use crate::csv::CsvFormatter;
pub use formatter::{BarRecord, FormatError, Formatter, OutputFormat, ReportOptions};
pub use json::JsonFormatter;
pub use table::TableFormatter;
