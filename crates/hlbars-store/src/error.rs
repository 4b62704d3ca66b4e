//! Error types for bar storage.

use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing bars.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create the database directory.
    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to open the database file.
    #[error("Failed to open database '{path}': {source}")]
    Open {
        /// The database path.
        path: PathBuf,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// A statement failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A bar value cannot be stored as a REAL column.
    #[error("Cannot store {field} value {value} as REAL")]
    Encode {
        /// Column name.
        field: &'static str,
        /// The offending value.
        value: Decimal,
    },

    /// A stored row could not be turned back into a bar.
    #[error("Corrupt row '{key}': {reason}")]
    Decode {
        /// Primary key of the row.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
