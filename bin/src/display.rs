//! Output selection for the hlbars CLI.

use anyhow::{Context, Result};
use clap::ValueEnum;
use hlbars_lib::{Ohlcv, OutputFormat, ReportOptions};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Report format for `dump`.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Format {
    Table,
    Csv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => Self::Table,
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Write bars to `output`, or to stdout when no path is given.
pub(crate) fn write_bars(
    bars: &[Ohlcv],
    output: Option<&Path>,
    format: Format,
    options: ReportOptions,
) -> Result<()> {
    let format = OutputFormat::from(format);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            format.write_bars(bars, BufWriter::new(file), options)?;
        }
        None => {
            let mut stdout = BufWriter::new(std::io::stdout());
            format.write_bars(bars, &mut stdout, options)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
