//! Error types for hlbars.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while converting a raw trade into a [`Tick`](crate::Tick).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickError {
    /// A numeric field could not be parsed as a decimal.
    #[error("Invalid {field} value: {value:?}")]
    InvalidNumber {
        /// Wire name of the field (`px` or `sz`).
        field: &'static str,
        /// The offending text.
        value: String,
    },

    /// Trade size is negative.
    #[error("Negative trade size: {0}")]
    NegativeSize(Decimal),

    /// Epoch milliseconds outside the supported date range.
    #[error("Invalid trade timestamp: {0} ms")]
    InvalidTimestamp(i64),
}
