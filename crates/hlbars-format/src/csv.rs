//! CSV output format.

use hlbars_aggregate::Ohlcv;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
///
/// Columns follow the stored table: `ts,open,high,low,close,volume`.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a comma-separated formatter with a header row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            include_header: true,
        }
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[Ohlcv],
        mut writer: W,
    ) -> Result<(), FormatError> {
        if self.include_header {
            writeln!(writer, "ts,open,high,low,close,volume")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{},{},{},{},{},{}",
                bar.bucket_key(),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
