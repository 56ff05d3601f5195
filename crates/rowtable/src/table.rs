use crate::filter::DateRange;
use crate::schema::{RowRecord, REQUIRED_COLUMNS};
use crate::{DashboardError, Result};

/// 32-byte hash
pub type Hash32 = [u8; 32];

/// Immutable, purchase-time ordered order rows.
#[derive(Clone, Debug)]
pub struct RowTable {
    rows: Vec<RowRecord>,
    columns: Vec<String>,
}

impl RowTable {
    /// Build a table from already-parsed rows, e.g. synthetic test data.
    pub fn from_rows(rows: Vec<RowRecord>) -> Result<Self> {
        let columns = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        Self::with_columns(rows, columns)
    }

    pub(crate) fn with_columns(mut rows: Vec<RowRecord>, columns: Vec<String>) -> Result<Self> {
        if rows.is_empty() {
            return Err(DashboardError::EmptyDataset);
        }
        // stable: rows sharing a timestamp keep file order
        rows.sort_by(|a, b| a.order_purchase_timestamp.cmp(&b.order_purchase_timestamp));
        Ok(Self { rows, columns })
    }

    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: construction rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header of the source file, extra columns included.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// `[min_date, max_date]` of purchase timestamps; the default range of
    /// the date picker.
    pub fn full_range(&self) -> DateRange {
        // non-empty and sorted by purchase timestamp
        let first = self.rows[0].purchase_date();
        let last = self.rows[self.rows.len() - 1].purchase_date();
        DateRange::between(first, last)
    }
}
