use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;

use crate::schema::{parse_timestamp, RowRecord, REQUIRED_COLUMNS};
use crate::table::{Hash32, RowTable};
use crate::{DashboardError, Result};

// Header-matched; any other column in the file is ignored.
#[derive(Deserialize)]
struct RawRow {
    seller_id: String,
    customer_id: String,
    response_category: String,
    response_time_hour: String,
    product_category_name_english: String,
    review_score: String,
    order_purchase_timestamp: String,
    order_estimated_delivery_date: String,
    seller_city: String,
    geolocation_lat_seller: String,
    geolocation_lng_seller: String,
    customer_city: String,
    geolocation_lat_customer: String,
    geolocation_lng_customer: String,
}

/// A table loaded from disk together with its provenance.
#[derive(Clone, Debug)]
pub struct LoadedDataset {
    pub path: PathBuf,
    pub table: RowTable,
    /// BLAKE3 over the raw file bytes
    pub content_hash: Hash32,
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<LoadedDataset> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let content_hash: Hash32 = blake3::hash(&bytes).into();
    let table = read_csv(bytes.as_slice())?;

    Ok(LoadedDataset {
        path: path.to_path_buf(),
        table,
        content_hash,
    })
}

/// Parse CSV with a header row. Missing required columns are reported all
/// at once, before any row is read.
pub fn read_csv<R: Read>(reader: R) -> Result<RowTable> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == **c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawRow = record.deserialize(Some(&headers))?;
        rows.push(convert(raw, line)?);
    }

    let columns = headers.iter().map(str::to_string).collect();
    RowTable::with_columns(rows, columns)
}

fn convert(raw: RawRow, line: u64) -> Result<RowRecord> {
    Ok(RowRecord {
        response_time_hour: number(&raw.response_time_hour, "response_time_hour", line)?,
        review_score: optional_number(&raw.review_score, "review_score", line)?,
        order_purchase_timestamp: timestamp(
            &raw.order_purchase_timestamp,
            "order_purchase_timestamp",
            line,
        )?,
        order_estimated_delivery_date: timestamp(
            &raw.order_estimated_delivery_date,
            "order_estimated_delivery_date",
            line,
        )?,
        seller_lat: optional_number(&raw.geolocation_lat_seller, "geolocation_lat_seller", line)?,
        seller_lng: optional_number(&raw.geolocation_lng_seller, "geolocation_lng_seller", line)?,
        customer_lat: optional_number(&raw.geolocation_lat_customer, "geolocation_lat_customer", line)?,
        customer_lng: optional_number(&raw.geolocation_lng_customer, "geolocation_lng_customer", line)?,
        seller_id: raw.seller_id,
        customer_id: raw.customer_id,
        response_category: text(raw.response_category),
        product_category: text(raw.product_category_name_english),
        seller_city: text(raw.seller_city),
        customer_city: text(raw.customer_city),
    })
}

fn text(value: String) -> Option<String> {
    let s = value.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn invalid(column: &'static str, value: &str, line: u64, reason: impl Into<String>) -> DashboardError {
    DashboardError::InvalidField {
        line,
        column,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn number(value: &str, column: &'static str, line: u64) -> Result<f64> {
    match optional_number(value, column, line)? {
        Some(v) => Ok(v),
        None => Err(invalid(column, value, line, "missing value")),
    }
}

/// Empty cells and NaN spellings are missing, not errors.
fn optional_number(value: &str, column: &'static str, line: u64) -> Result<Option<f64>> {
    let s = value.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let v: f64 = s
        .parse()
        .map_err(|e: std::num::ParseFloatError| invalid(column, value, line, e.to_string()))?;
    if !v.is_finite() {
        return Err(invalid(column, value, line, "not a finite number"));
    }
    Ok(Some(v))
}

fn timestamp(value: &str, column: &'static str, line: u64) -> Result<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| invalid(column, value, line, "unrecognized timestamp"))
}
