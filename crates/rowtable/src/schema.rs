use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Columns the loader refuses to run without.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "seller_id",
    "customer_id",
    "response_category",
    "response_time_hour",
    "product_category_name_english",
    "review_score",
    "order_purchase_timestamp",
    "order_estimated_delivery_date",
    "seller_city",
    "geolocation_lat_seller",
    "geolocation_lng_seller",
    "customer_city",
    "geolocation_lat_customer",
    "geolocation_lng_customer",
];

/// Which side of an order a location belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Seller,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seller => "seller",
            Role::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One order line with its seller, customer, review and geolocation facts.
#[derive(Clone, Debug, PartialEq)]
pub struct RowRecord {
    pub seller_id: String,
    pub customer_id: String,
    // `None` for empty cells; grouping skips them
    pub response_category: Option<String>,
    pub response_time_hour: f64,
    pub product_category: Option<String>,
    pub review_score: Option<f64>,
    pub order_purchase_timestamp: NaiveDateTime,
    pub order_estimated_delivery_date: NaiveDateTime,

    pub seller_city: Option<String>,
    pub seller_lat: Option<f64>,
    pub seller_lng: Option<f64>,

    pub customer_city: Option<String>,
    pub customer_lat: Option<f64>,
    pub customer_lng: Option<f64>,
}

impl RowRecord {
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, the `T`-separated form (both with optional
/// fractional seconds) and a bare `YYYY-MM-DD`, which means midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
