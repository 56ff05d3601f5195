//! The four derived views computed from one filtered row set.
//!
//! Every function here takes `FilteredRows`, which cannot be empty, so the
//! views never have to reason about an empty range.

use std::collections::{BTreeMap, HashSet};

use rowtable::{FilteredRows, Role};
use serde::Serialize;

/// Fast/normal/slow cut-offs in hours, applied to the rounded mean.
pub const FAST_MAX_HOURS: f64 = 2.0;
pub const SLOW_MIN_HOURS: f64 = 12.0;

/// Round the exact binary value to `decimals` places, so 2.05 (stored as
/// 2.0499..) becomes 2.0.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

// Seller response

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub response_category: String,
    pub response_count: u64,
}

/// Row count per `response_category`. Rows without a category are not
/// counted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SellerResponse {
    counts: BTreeMap<String, u64>,
}

impl SellerResponse {
    pub fn get(&self, category: &str) -> Option<u64> {
        self.counts.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Categories in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Display order: count descending, ties by category name.
    pub fn ranked(&self) -> Vec<CategoryCount> {
        let mut out: Vec<CategoryCount> = self
            .iter()
            .map(|(category, count)| CategoryCount {
                response_category: category.to_string(),
                response_count: count,
            })
            .collect();
        out.sort_by(|a, b| b.response_count.cmp(&a.response_count));
        out
    }
}

pub fn create_seller_response(rows: &FilteredRows<'_>) -> SellerResponse {
    let mut counts = BTreeMap::new();
    for row in rows.iter() {
        let Some(category) = &row.response_category else { continue };
        *counts.entry(category.clone()).or_insert(0) += 1;
    }
    SellerResponse { counts }
}

// Review rate

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryRating {
    pub product_category: String,
    pub review_score: f64,
}

/// Mean review score per product category, best first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewRate {
    ratings: Vec<CategoryRating>,
}

impl ReviewRate {
    pub fn as_slice(&self) -> &[CategoryRating] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// True when no row in range carried a score.
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.ratings
            .iter()
            .find(|r| r.product_category == category)
            .map(|r| r.review_score)
    }

    pub fn best(&self, n: usize) -> Vec<CategoryRating> {
        self.ratings.iter().take(n).cloned().collect()
    }

    /// Lowest `n`, ascending.
    pub fn worst(&self, n: usize) -> Vec<CategoryRating> {
        self.ratings.iter().rev().take(n).cloned().collect()
    }

    pub fn max_score(&self) -> Option<f64> {
        self.ratings.first().map(|r| r.review_score)
    }

    /// Unweighted mean of the per-category means.
    pub fn mean_of_means(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: f64 = self.ratings.iter().map(|r| r.review_score).sum();
        Some(sum / self.ratings.len() as f64)
    }
}

pub fn create_review_rate(rows: &FilteredRows<'_>) -> ReviewRate {
    let mut acc: BTreeMap<&str, (f64, u64)> = BTreeMap::new();
    for row in rows.iter() {
        let (Some(category), Some(score)) = (&row.product_category, row.review_score) else {
            continue;
        };
        let e = acc.entry(category.as_str()).or_insert((0.0, 0));
        e.0 += score;
        e.1 += 1;
    }

    let mut ratings: Vec<CategoryRating> = acc
        .into_iter()
        .map(|(category, (sum, n))| CategoryRating {
            product_category: category.to_string(),
            review_score: sum / n as f64,
        })
        .collect();

    // stable, so equal means stay in category order
    ratings.sort_by(|a, b| b.review_score.total_cmp(&a.review_score));
    ReviewRate { ratings }
}

// User locations

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserLocation {
    pub user_id: String,
    pub role: Role,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub users: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Sellers and customers under one schema, exact duplicates removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationTable {
    records: Vec<UserLocation>,
}

impl LocationTable {
    pub fn as_slice(&self) -> &[UserLocation] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn by_role(&self, role: Role) -> impl Iterator<Item = &UserLocation> + '_ {
        self.records.iter().filter(move |r| r.role == role)
    }

    /// Map points for one role; records without both coordinates are left out.
    pub fn points(&self, role: Role) -> Vec<GeoPoint> {
        self.by_role(role)
            .filter_map(|r| match (r.latitude, r.longitude) {
                (Some(latitude), Some(longitude)) => Some(GeoPoint { latitude, longitude }),
                _ => None,
            })
            .collect()
    }

    /// Location records per city for one role: count descending, ties by
    /// city name. Records without a city are skipped.
    pub fn city_counts(&self, role: Role) -> Vec<CityCount> {
        let mut acc: BTreeMap<&str, u64> = BTreeMap::new();
        for r in self.by_role(role) {
            let Some(city) = &r.city else { continue };
            *acc.entry(city.as_str()).or_insert(0) += 1;
        }
        let mut out: Vec<CityCount> = acc
            .into_iter()
            .map(|(city, users)| CityCount {
                city: city.to_string(),
                users,
            })
            .collect();
        out.sort_by(|a, b| b.users.cmp(&a.users));
        out
    }
}

type LocationKey = (String, Role, Option<String>, Option<u64>, Option<u64>);

// -0.0 and 0.0 are the same coordinate
fn coord_bits(v: Option<f64>) -> Option<u64> {
    v.map(|v| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
}

pub fn create_user_location(rows: &FilteredRows<'_>) -> LocationTable {
    let sellers = rows.iter().map(|r| UserLocation {
        user_id: r.seller_id.clone(),
        role: Role::Seller,
        city: r.seller_city.clone(),
        latitude: r.seller_lat,
        longitude: r.seller_lng,
    });
    let customers = rows.iter().map(|r| UserLocation {
        user_id: r.customer_id.clone(),
        role: Role::Customer,
        city: r.customer_city.clone(),
        latitude: r.customer_lat,
        longitude: r.customer_lng,
    });

    let mut seen: HashSet<LocationKey> = HashSet::new();
    let records = sellers
        .chain(customers)
        .filter(|loc| {
            seen.insert((
                loc.user_id.clone(),
                loc.role,
                loc.city.clone(),
                coord_bits(loc.latitude),
                coord_bits(loc.longitude),
            ))
        })
        .collect();

    LocationTable { records }
}

// Orders / response time

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ResponsePerformance {
    Fast,
    Normal,
    Slow,
}

impl ResponsePerformance {
    /// `hours` is expected to be rounded already.
    pub fn classify(hours: f64) -> Self {
        if hours <= FAST_MAX_HOURS {
            ResponsePerformance::Fast
        } else if hours < SLOW_MIN_HOURS {
            ResponsePerformance::Normal
        } else {
            ResponsePerformance::Slow
        }
    }
}

/// `response_time_hour` of every filtered row, in row order.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseSeries {
    hours: Vec<f64>,
}

impl ResponseSeries {
    pub fn as_slice(&self) -> &[f64] {
        &self.hours
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    pub fn mean(&self) -> f64 {
        self.hours.iter().sum::<f64>() / self.hours.len() as f64
    }

    /// Mean response time rounded to one decimal.
    pub fn average_hours(&self) -> f64 {
        round_to(self.mean(), 1)
    }

    pub fn performance(&self) -> ResponsePerformance {
        ResponsePerformance::classify(self.average_hours())
    }
}

pub fn create_orders(rows: &FilteredRows<'_>) -> ResponseSeries {
    ResponseSeries {
        hours: rows.iter().map(|r| r.response_time_hour).collect(),
    }
}
