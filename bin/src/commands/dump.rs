//! The `dump` command: print what the collector stored.

use anyhow::{Context, Result};
use hlbars_lib::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::display::{Format, write_bars};

/// Reads every stored bar through a read-only connection.
pub(crate) fn load_bars(db_path: &Path, head: Option<usize>) -> Result<Vec<Ohlcv>> {
    let store = SqliteBarStore::open_read_only(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    let mut bars = store.scan_all().context("Failed to read stored bars")?;
    if let Some(n) = head {
        bars.truncate(n);
    }
    Ok(bars)
}

pub(crate) fn dump(
    config_path: &Path,
    db_path: Option<PathBuf>,
    format: Format,
    head: Option<usize>,
    output: Option<&Path>,
    options: ReportOptions,
) -> Result<()> {
    let db_path = db_path.unwrap_or_else(|| CollectorConfig::load(config_path).db_path);

    let bars = load_bars(&db_path, head)?;
    debug!(rows = bars.len(), db = %db_path.display(), "loaded bars");

    write_bars(&bars, output, format, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hlbars_lib::{Tick, aggregate_ticks};
    use tempfile::TempDir;

    fn seed(path: &Path, seconds: &[i64]) {
        let mut store = SqliteBarStore::open(path).unwrap();
        let ticks: Vec<_> = seconds
            .iter()
            .map(|s| RawTrade::new("100.5", "2", 1_704_067_200_000 + s * 1000))
            .map(|t| t.normalize().unwrap())
            .collect::<Vec<Tick>>();
        for bar in aggregate_ticks(&ticks).unwrap() {
            store.upsert(&bar).unwrap();
        }
    }

    #[test]
    fn test_dump_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("bars.db");
        let out = temp_dir.path().join("bars.csv");
        seed(&db, &[3, 1, 2]);

        dump(
            &temp_dir.path().join("none.yaml"),
            Some(db),
            Format::Csv,
            Some(2),
            Some(&out),
            ReportOptions::default(),
        )
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<_> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ts,open,high,low,close,volume",
                "2024-01-01 00:00:01,100.5,100.5,100.5,100.5,2",
                "2024-01-01 00:00:02,100.5,100.5,100.5,100.5,2",
            ]
        );
    }

    #[test]
    fn test_dump_does_not_create_database() {
        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("missing.db");

        assert!(load_bars(&db, None).is_err());
        assert!(!db.exists());
    }

    #[test]
    fn test_db_path_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("configured.db");
        let config = temp_dir.path().join("config.yaml");
        std::fs::write(&config, format!("db_path: {}\n", db.display())).unwrap();
        seed(&db, &[7]);

        let out = temp_dir.path().join("bars.txt");
        dump(
            &config,
            None,
            Format::Table,
            None,
            Some(&out),
            ReportOptions::default(),
        )
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            written.trim_end(),
            "[2024-01-01 00:00:07] O=100.50 H=100.50 L=100.50 C=100.50 V=2.0000"
        );
    }

    #[test]
    fn test_dump_csv_without_header() {
        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("bars.db");
        let out = temp_dir.path().join("bars.csv");
        seed(&db, &[4]);

        let options = ReportOptions {
            header: false,
            ..ReportOptions::default()
        };
        dump(
            &temp_dir.path().join("none.yaml"),
            Some(db),
            Format::Csv,
            None,
            Some(&out),
            options,
        )
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "2024-01-01 00:00:04,100.5,100.5,100.5,100.5,2\n");
    }

    #[test]
    fn test_dump_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let db = temp_dir.path().join("bars.db");
        let out = temp_dir.path().join("bars.json");
        seed(&db, &[1, 2]);

        let options = ReportOptions {
            pretty: true,
            ..ReportOptions::default()
        };
        dump(
            &temp_dir.path().join("none.yaml"),
            Some(db),
            Format::Json,
            None,
            Some(&out),
            options,
        )
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.starts_with("[\n  {\n"));
        assert!(written.contains("\"ts\": \"2024-01-01 00:00:01\""));
        assert!(written.contains("\"ts\": \"2024-01-01 00:00:02\""));
    }
}
