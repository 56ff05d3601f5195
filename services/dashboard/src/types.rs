use chrono::NaiveDate;
use insights::{Dashboard, Snapshot};
use rowtable::{DateRange, Hash32};
use serde::{Deserialize, Serialize};

pub const NO_DATA_MESSAGE: &str = "Data on date not available";
pub const NO_DATA_HINT: &str = "Please enter the date correctly";

/// The date-range control. Omitted bounds default to the data's span.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardResponse {
    NoData {
        range: DateRange,
        message: &'static str,
        hint: &'static str,
    },
    Ready {
        range: DateRange,
        dashboard: Dashboard,
    },
}

impl From<Snapshot> for DashboardResponse {
    fn from(snapshot: Snapshot) -> Self {
        match snapshot {
            Snapshot::NoData { range } => DashboardResponse::NoData {
                range,
                message: NO_DATA_MESSAGE,
                hint: NO_DATA_HINT,
            },
            Snapshot::Ready { range, dashboard } => DashboardResponse::Ready { range, dashboard },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DatasetInfo {
    pub path: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub range: DateRange,
    #[serde(with = "hex", rename = "content_hash_hex")]
    pub content_hash: Hash32, // BLAKE3(file_bytes)
    pub loaded_at: u64,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}
