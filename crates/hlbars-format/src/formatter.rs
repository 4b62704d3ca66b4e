//! Output format abstraction.

use hlbars_aggregate::Ohlcv;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::{CsvFormatter, JsonFormatter, TableFormatter};

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// One confirmation line per bar.
    #[default]
    Table,
    /// CSV format.
    Csv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the canonical name of this format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Table, Self::Csv, Self::Json, Self::Ndjson]
    }

    /// Writes `bars` to `writer` with the formatter for this format.
    ///
    /// Options that do not apply to the format are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or serialization fails.
    pub fn write_bars<W: Write + Send>(
        &self,
        bars: &[Ohlcv],
        writer: W,
        options: ReportOptions,
    ) -> Result<(), FormatError> {
        match self {
            Self::Table => TableFormatter.write_bars(bars, writer),
            Self::Csv => CsvFormatter::new()
                .with_header(options.header)
                .write_bars(bars, writer),
            Self::Json => JsonFormatter::new()
                .with_pretty(options.pretty)
                .write_bars(bars, writer),
            Self::Ndjson => JsonFormatter::ndjson().write_bars(bars, writer),
        }
    }
}

/// Per-report layout switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Write the CSV header row.
    pub header: bool,
    /// Indent the JSON array.
    pub pretty: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            header: true,
            pretty: false,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A bar as it appears in serialized reports, keyed like the stored row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarRecord {
    /// Bucket key, e.g. `2024-01-01 00:00:05`.
    pub ts: String,
    /// Opening price.
    pub open: Decimal,
    /// Highest price.
    pub high: Decimal,
    /// Lowest price.
    pub low: Decimal,
    /// Closing price.
    pub close: Decimal,
    /// Summed size.
    pub volume: Decimal,
}

impl From<&Ohlcv> for BarRecord {
    fn from(bar: &Ohlcv) -> Self {
        Self {
            ts: bar.bucket_key(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

/// Trait for report formatters.
pub trait Formatter: Send + Sync {
    /// Writes bars to the output in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError>;
}
