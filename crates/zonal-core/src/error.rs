//! Unified error types for the zonal workspace
//!
//! Structural problems with an input extract (a value column whose time label
//! cannot be parsed, a column the caller named that does not exist, ragged
//! columns) surface as [`ZonalError`] and abort the table being processed.
//! Data-quality gaps such as blank or non-numeric cells are not errors; the
//! engines recover from them locally by exclusion.
//!
//! # Example
//!
//! ```ignore
//! use zonal_core::{ZonalError, ZonalResult};
//!
//! fn prepare(table: &Table) -> ZonalResult<Table> {
//!     let region = table.column("Region")?;
//!     // ...
//! }
//! ```

use thiserror::Error;

/// Unified error type for all zonal operations.
#[derive(Error, Debug)]
pub enum ZonalError {
    /// A value column's label does not carry a parseable time index
    #[error("Malformed time label '{column}': {reason}")]
    MalformedTimeLabel { column: String, reason: String },

    /// A column required by the caller is absent from the table
    #[error("Missing column '{0}'")]
    MissingColumn(String),

    /// Columns of one table disagree on their height
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Hourly values cannot be laid out on a gap-free global hour axis
    #[error("Hour axis error: {0}")]
    HourAxis(String),

    /// Data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results using ZonalError.
pub type ZonalResult<T> = Result<T, ZonalError>;

impl ZonalError {
    pub fn malformed_label(column: impl Into<String>, reason: impl Into<String>) -> Self {
        ZonalError::MalformedTimeLabel {
            column: column.into(),
            reason: reason.into(),
        }
    }
}
