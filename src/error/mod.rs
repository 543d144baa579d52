//! Error handling for perf-trends.

pub mod util;

use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Errors raised while resolving selections, validating datasets or computing frequencies
///
/// Absence of a matching value is never an error: the engine reports it as a
/// zero. Everything in here is either a caller contract violation or a
/// defect in the data that must not be hidden behind a zero count.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Category name outside Genre, Nationality, Work, Composer
    #[error("Unknown category '{0}': expected one of Genre, Nationality, Work, Composer")]
    UnknownCategory(String),

    /// Work/Composer display value without an embedded `(#<id>)`
    #[error("Malformed identifier in '{value}': expected '<label> (#<id>)'")]
    MalformedIdentifier { value: String },

    /// No value was selected
    #[error("No value selected for category {category}")]
    EmptySelection { category: String },

    /// Several values were selected for a single-valued category
    #[error("Category {category} takes a single value, got {count}")]
    InvalidSelection { category: String, count: usize },

    /// Required column missing from a record batch
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// Column present but with an unexpected data type
    #[error("Column '{column}' is not a {expected} array")]
    InvalidDataType { column: String, expected: String },

    /// Null found in a column that must be fully populated
    #[error("Column '{column}' contains {count} null value(s)")]
    NullValue { column: String, count: usize },

    /// The same event identifier appears on more than one row
    #[error("Event '{event_id}' appears more than once")]
    DuplicateEvent { event_id: String },

    /// Year range spanning more years than a series may hold
    #[error("Year range {start}..={end} spans more than {max} years")]
    YearRangeTooLong { start: i32, end: i32, max: u32 },

    /// Dataset schema cannot be used
    #[error("Schema error: {0}")]
    Schema(String),

    /// File system error with the offending path attached
    #[error("{context}: {}", path.display())]
    File {
        path: PathBuf,
        context: String,
        #[source]
        source: Option<io::Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_arrow::Error),
}

impl Error {
    /// File error without an underlying IO error
    pub fn file(path: &Path, context: impl Into<String>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            context: context.into(),
            source: None,
        }
    }

    /// File error wrapping the IO error that caused it
    pub fn file_with_source(path: &Path, context: impl Into<String>, source: io::Error) -> Self {
        Self::File {
            path: path.to_path_buf(),
            context: context.into(),
            source: Some(source),
        }
    }

    pub(crate) fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }

    pub(crate) fn invalid_type(column: &str, expected: &str) -> Self {
        Self::InvalidDataType {
            column: column.to_string(),
            expected: expected.to_string(),
        }
    }
}

/// Result type for perf-trends operations
pub type Result<T> = std::result::Result<T, Error>;
