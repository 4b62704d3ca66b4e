//! SQLite-backed bar store.

use hlbars_aggregate::Ohlcv;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{BarStore, Result, StoreError};

/// Name of the bar table.
pub const TABLE_NAME: &str = "kline_1s";

const SCHEMA_SQL: &str = r"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;

CREATE TABLE IF NOT EXISTS kline_1s (
    ts TEXT PRIMARY KEY,
    open REAL,
    high REAL,
    low REAL,
    close REAL,
    volume REAL
);
";

const UPSERT_SQL: &str = "INSERT OR REPLACE INTO kline_1s (ts, open, high, low, close, volume)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_ALL_SQL: &str =
    "SELECT ts, open, high, low, close, volume FROM kline_1s ORDER BY ts ASC";

const SELECT_LATEST_SQL: &str =
    "SELECT ts, open, high, low, close, volume FROM kline_1s ORDER BY ts DESC LIMIT 1";

/// Row as stored, before conversion back into decimals.
type RawRow = (String, f64, f64, f64, f64, f64);

/// Bar store on a single SQLite connection.
///
/// The writer opened with [`SqliteBarStore::open`] is meant to be the only
/// writer. Readers open their own handle with
/// [`SqliteBarStore::open_read_only`].
#[derive(Debug)]
pub struct SqliteBarStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteBarStore {
    /// Opens (or creates) the database at `path` for writing.
    ///
    /// Creates the parent directory if needed. Opening an existing database
    /// keeps its rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, the file cannot
    /// be opened, or the schema cannot be applied.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(path, flags).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        conn.execute_batch(SCHEMA_SQL)?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode", [], |row| row.get(0))?;
        if !journal_mode.eq_ignore_ascii_case("wal") {
            warn!(%journal_mode, "WAL mode not active, readers may block the writer");
        }

        info!(path = %path.display(), "bar store opened");

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Opens an existing database without write access.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
            |e| StoreError::Open {
                path: path.to_path_buf(),
                source: e,
            },
        )?;

        debug!(path = %path.display(), "bar store opened read-only");

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Creates a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if SQLite cannot allocate the database.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn, path: None })
    }

    /// Returns the database path, or `None` for an in-memory store.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns the number of stored bars.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kline_1s", [], |row| row.get(0))?;
        decode_count(count)
    }

    /// Returns the bar with the greatest bucket key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read or the row is corrupt.
    pub fn latest(&self) -> Result<Option<Ohlcv>> {
        self.conn
            .query_row(SELECT_LATEST_SQL, [], read_row)
            .optional()?
            .map(decode_row)
            .transpose()
    }
}

impl BarStore for SqliteBarStore {
    fn upsert(&mut self, bar: &Ohlcv) -> Result<()> {
        let key = bar.bucket_key();
        self.conn.execute(
            UPSERT_SQL,
            params![
                key,
                encode("open", bar.open)?,
                encode("high", bar.high)?,
                encode("low", bar.low)?,
                encode("close", bar.close)?,
                encode("volume", bar.volume)?,
            ],
        )?;
        debug!(ts = %key, "bar upserted");
        Ok(())
    }

    fn scan_all(&self) -> Result<Vec<Ohlcv>> {
        let mut stmt = self.conn.prepare(SELECT_ALL_SQL)?;
        let rows = stmt.query_map([], read_row)?;

        let mut bars = Vec::new();
        for row in rows {
            bars.push(decode_row(row?)?);
        }
        Ok(bars)
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn decode_row((key, open, high, low, close, volume): RawRow) -> Result<Ohlcv> {
    let timestamp = Ohlcv::parse_bucket_key(&key).map_err(|e| StoreError::Decode {
        key: key.clone(),
        reason: e.to_string(),
    })?;

    let decode = |value: f64| {
        Decimal::try_from(value).map_err(|e| StoreError::Decode {
            key: key.clone(),
            reason: e.to_string(),
        })
    };

    Ok(Ohlcv::new(
        timestamp,
        decode(open)?,
        decode(high)?,
        decode(low)?,
        decode(close)?,
        decode(volume)?,
    ))
}

fn decode_count(count: i64) -> Result<u64> {
    u64::try_from(count).map_err(|e| StoreError::Decode {
        key: "COUNT(*)".to_string(),
        reason: format!("{count}: {e}"),
    })
}

fn encode(field: &'static str, value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(StoreError::Encode { field, value })
}
