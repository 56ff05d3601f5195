use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::schema::RowRecord;
use crate::table::RowTable;
use crate::{DashboardError, Result};

/// Inclusive calendar-day range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    start: NaiveDate,
    #[serde(rename = "end_date")]
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DashboardError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    // caller guarantees start <= end
    pub(crate) fn between(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Day granularity: the time of day is ignored on both bounds.
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        let day = ts.date();
        self.start <= day && day <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Rows that passed the date filter. Never empty.
#[derive(Clone, Debug)]
pub struct FilteredRows<'a> {
    rows: Vec<&'a RowRecord>,
}

impl<'a> FilteredRows<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; an empty filter result is `FilterOutcome::Empty`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a RowRecord> + '_ {
        self.rows.iter().copied()
    }
}

#[derive(Clone, Debug)]
pub enum FilterOutcome<'a> {
    Empty,
    Rows(FilteredRows<'a>),
}

impl<'a> FilterOutcome<'a> {
    pub fn rows(&self) -> Option<&FilteredRows<'a>> {
        match self {
            FilterOutcome::Empty => None,
            FilterOutcome::Rows(rows) => Some(rows),
        }
    }
}

/// Keep rows whose purchase date falls inside `range`, in table order.
pub fn filter_by_date<'a>(table: &'a RowTable, range: &DateRange) -> FilterOutcome<'a> {
    let rows: Vec<&RowRecord> = table
        .rows()
        .iter()
        .filter(|r| range.contains(&r.order_purchase_timestamp))
        .collect();

    if rows.is_empty() {
        FilterOutcome::Empty
    } else {
        FilterOutcome::Rows(FilteredRows { rows })
    }
}
