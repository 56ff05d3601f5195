//! Order row-table
//!
//! Loads the denormalized order dataset (orders joined with sellers,
//! customers, reviews and geolocation) and restricts it to a date range.

mod schema;
mod loader;
mod table;
mod filter;

pub use schema::{RowRecord, Role, REQUIRED_COLUMNS, parse_timestamp};
pub use loader::{load_csv, read_csv, LoadedDataset};
pub use table::{RowTable, Hash32};
pub use filter::{filter_by_date, DateRange, FilterOutcome, FilteredRows};

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Line {line}: invalid {column} value {value:?}: {reason}")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("Dataset contains no rows")]
    EmptyDataset,

    #[error("Invalid date range: {start} is after {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

pub type Result<T> = std::result::Result<T, DashboardError>;
