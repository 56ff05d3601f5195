use rowtable::{filter_by_date, DateRange, FilterOutcome, FilteredRows, Role, RowTable};
use serde::Serialize;

use crate::views::{
    create_orders, create_review_rate, create_seller_response, create_user_location, round_to,
    CategoryCount, CategoryRating, CityCount, GeoPoint, ResponsePerformance,
};

/// Length of every best/worst/top list on the dashboard.
pub const TOP_N: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseSummary {
    pub average_hours: f64,
    pub performance: ResponsePerformance,
    pub categories: Vec<CategoryCount>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub best_rating: Option<f64>,
    pub average_rating: Option<f64>,
    pub best_categories: Vec<CategoryRating>,
    pub worst_categories: Vec<CategoryRating>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LocationSummary {
    pub top_seller_city: Option<String>,
    pub top_customer_city: Option<String>,
    pub seller_cities: Vec<CityCount>,
    pub customer_cities: Vec<CityCount>,
    pub seller_points: Vec<GeoPoint>,
    pub customer_points: Vec<GeoPoint>,
}

/// Everything the page shows for one non-empty range.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub rows: usize,
    pub response: ResponseSummary,
    pub reviews: ReviewSummary,
    pub locations: LocationSummary,
}

impl Dashboard {
    pub fn from_rows(rows: &FilteredRows<'_>) -> Self {
        let orders = create_orders(rows);
        let seller_response = create_seller_response(rows);
        let review_rate = create_review_rate(rows);
        let user_locations = create_user_location(rows);

        let seller_cities = user_locations.city_counts(Role::Seller);
        let customer_cities = user_locations.city_counts(Role::Customer);

        Self {
            rows: rows.len(),
            response: ResponseSummary {
                average_hours: orders.average_hours(),
                performance: orders.performance(),
                categories: seller_response.ranked(),
            },
            reviews: ReviewSummary {
                best_rating: review_rate.max_score(),
                average_rating: review_rate.mean_of_means().map(|m| round_to(m, 2)),
                best_categories: review_rate.best(TOP_N),
                worst_categories: review_rate.worst(TOP_N),
            },
            locations: LocationSummary {
                top_seller_city: seller_cities.first().map(|c| c.city.clone()),
                top_customer_city: customer_cities.first().map(|c| c.city.clone()),
                seller_points: user_locations.points(Role::Seller),
                customer_points: user_locations.points(Role::Customer),
                seller_cities: seller_cities.into_iter().take(TOP_N).collect(),
                customer_cities: customer_cities.into_iter().take(TOP_N).collect(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Snapshot {
    NoData { range: DateRange },
    Ready { range: DateRange, dashboard: Dashboard },
}

impl Snapshot {
    pub fn range(&self) -> DateRange {
        match self {
            Snapshot::NoData { range } | Snapshot::Ready { range, .. } => *range,
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            Snapshot::NoData { .. } => None,
            Snapshot::Ready { dashboard, .. } => Some(dashboard),
        }
    }
}

/// Filter, then aggregate. Aggregations only run on a non-empty range.
pub fn build_snapshot(table: &RowTable, range: DateRange) -> Snapshot {
    match filter_by_date(table, &range) {
        FilterOutcome::Empty => Snapshot::NoData { range },
        FilterOutcome::Rows(rows) => Snapshot::Ready {
            range,
            dashboard: Dashboard::from_rows(&rows),
        },
    }
}
