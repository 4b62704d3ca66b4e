//! Plain-text report, one confirmation line per bar.

use hlbars_aggregate::Ohlcv;
use std::io::Write;

use crate::{FormatError, Formatter};

/// Writes each bar in its `Display` form, e.g.
/// `[2024-01-01 00:00:05] O=100.00 H=105.00 L=95.00 C=95.00 V=4.0000`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn write_bars<W: Write + Send>(
        &self,
        bars: &[Ohlcv],
        mut writer: W,
    ) -> Result<(), FormatError> {
        for bar in bars {
            writeln!(writer, "{bar}")?;
        }
        writer.flush()?;
        Ok(())
    }
}
