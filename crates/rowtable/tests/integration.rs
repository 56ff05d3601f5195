use chrono::NaiveDate;
use rowtable::{filter_by_date, read_csv, DashboardError, DateRange, FilterOutcome, Role};

const HEADER: &str = "index,seller_id,role_seller,seller_city,geolocation_lat_seller,geolocation_lng_seller,\
customer_id,role_customer,customer_city,geolocation_lat_customer,geolocation_lng_customer,\
response_category,response_time_hour,product_category_name_english,review_score,\
order_purchase_timestamp,order_estimated_delivery_date";

fn csv_with(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for r in rows {
        out.push('\n');
        out.push_str(r);
    }
    out.push('\n');
    out
}

fn sample_csv() -> String {
    csv_with(&[
        "0,s1,seller,sao paulo,-23.5,-46.6,c1,customer,rio de janeiro,-22.9,-43.2,fast,1.0,toys,5,2018-01-03 10:00:00,2018-01-20 00:00:00",
        "1,s2,seller,curitiba,-25.4,-49.3,c2,customer,sao paulo,-23.5,-46.6,slow,20.0,health_beauty,,2018-01-01 09:30:00,2018-01-15 00:00:00",
        "2,s1,seller,sao paulo,-23.5,-46.6,c3,customer,campinas,-22.9,-47.1,fast,2.0,toys,3,2018-01-02 23:59:59,2018-01-18",
    ])
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_sorts_by_purchase_timestamp() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();

    assert_eq!(table.len(), 3);
    let customers: Vec<&str> = table.rows().iter().map(|r| r.customer_id.as_str()).collect();
    assert_eq!(customers, vec!["c2", "c3", "c1"]);
    assert!(table
        .rows()
        .windows(2)
        .all(|w| w[0].order_purchase_timestamp <= w[1].order_purchase_timestamp));
}

#[test]
fn test_load_parses_fields() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();
    let first = &table.rows()[0];

    assert_eq!(first.seller_id, "s2");
    assert_eq!(first.seller_city.as_deref(), Some("curitiba"));
    assert_eq!(first.response_category.as_deref(), Some("slow"));
    assert_eq!(first.response_time_hour, 20.0);
    assert_eq!(first.product_category.as_deref(), Some("health_beauty"));
    assert_eq!(first.review_score, None);
    assert_eq!(first.customer_lat, Some(-23.5));
    assert_eq!(first.purchase_date(), day(2018, 1, 1));

    let last = &table.rows()[2];
    assert_eq!(last.review_score, Some(5.0));
}

#[test]
fn test_load_keeps_header_columns() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();
    assert_eq!(table.columns()[0], "index");
    assert!(table.columns().iter().any(|c| c == "role_customer"));
}

#[test]
fn test_missing_columns_are_fatal() {
    let csv = "seller_id,customer_id,response_category\ns1,c1,fast\n";
    let err = read_csv(csv.as_bytes()).unwrap_err();

    match err {
        DashboardError::MissingColumns(cols) => {
            assert!(cols.contains(&"review_score".to_string()));
            assert!(cols.contains(&"order_purchase_timestamp".to_string()));
            assert!(!cols.contains(&"seller_id".to_string()));
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn test_invalid_timestamp_reports_line() {
    let csv = csv_with(&[
        "0,s1,seller,sao paulo,-23.5,-46.6,c1,customer,rio,-22.9,-43.2,fast,1.0,toys,5,2018-01-03 10:00:00,2018-01-20",
        "1,s2,seller,curitiba,-25.4,-49.3,c2,customer,rio,-22.9,-43.2,fast,1.0,toys,5,yesterday,2018-01-20",
    ]);
    let err = read_csv(csv.as_bytes()).unwrap_err();

    match err {
        DashboardError::InvalidField { line, column, value, .. } => {
            assert_eq!(line, 3);
            assert_eq!(column, "order_purchase_timestamp");
            assert_eq!(value, "yesterday");
        }
        other => panic!("expected InvalidField, got {other:?}"),
    }
}

#[test]
fn test_missing_response_hours_is_invalid() {
    let csv = csv_with(&[
        "0,s1,seller,sao paulo,-23.5,-46.6,c1,customer,rio,-22.9,-43.2,fast,,toys,5,2018-01-03 10:00:00,2018-01-20",
    ]);
    let err = read_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::InvalidField { column: "response_time_hour", .. }
    ));
}

#[test]
fn test_empty_cells_load_as_missing() {
    let csv = csv_with(&[
        "0,s1,seller,,,-46.6,c1,customer,rio,-22.9,,,1.0,,4,2018-01-03 10:00:00,2018-01-20",
    ]);
    let table = read_csv(csv.as_bytes()).unwrap();
    let row = &table.rows()[0];

    assert_eq!(row.seller_city, None);
    assert_eq!(row.seller_lat, None);
    assert_eq!(row.seller_lng, Some(-46.6));
    assert_eq!(row.customer_lng, None);
    assert_eq!(row.response_category, None);
    assert_eq!(row.product_category, None);
    assert_eq!(row.review_score, Some(4.0));
}

#[test]
fn test_bad_coordinate_is_invalid() {
    let csv = csv_with(&[
        "0,s1,seller,sao paulo,north,-46.6,c1,customer,rio,-22.9,-43.2,fast,1.0,toys,4,2018-01-03 10:00:00,2018-01-20",
    ]);
    let err = read_csv(csv.as_bytes()).unwrap_err();
    assert!(matches!(
        err,
        DashboardError::InvalidField { column: "geolocation_lat_seller", .. }
    ));
}

#[test]
fn test_header_only_is_empty_dataset() {
    let err = read_csv(csv_with(&[]).as_bytes()).unwrap_err();
    assert!(matches!(err, DashboardError::EmptyDataset));
}

#[test]
fn test_full_range_spans_min_and_max_dates() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();
    let range = table.full_range();

    assert_eq!(range.start(), day(2018, 1, 1));
    assert_eq!(range.end(), day(2018, 1, 3));
}

#[test]
fn test_filter_single_min_day() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();
    let min = table.full_range().start();

    let outcome = filter_by_date(&table, &DateRange::single_day(min));
    let rows = outcome.rows().expect("rows on min date");

    assert_eq!(rows.len(), 1);
    assert!(rows.iter().all(|r| r.purchase_date() == min));
}

#[test]
fn test_filter_end_day_is_inclusive() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();
    let range = DateRange::new(day(2018, 1, 1), day(2018, 1, 2)).unwrap();

    let outcome = filter_by_date(&table, &range);
    let ids: Vec<&str> = outcome
        .rows()
        .unwrap()
        .iter()
        .map(|r| r.customer_id.as_str())
        .collect();

    // c3 was bought at 23:59:59 on the end day
    assert_eq!(ids, vec!["c2", "c3"]);
}

#[test]
fn test_filter_outside_span_is_empty() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();
    let range = DateRange::new(day(2019, 1, 1), day(2019, 12, 31)).unwrap();

    assert!(matches!(filter_by_date(&table, &range), FilterOutcome::Empty));
}

#[test]
fn test_filter_does_not_touch_source() {
    let table = read_csv(sample_csv().as_bytes()).unwrap();
    let before = table.rows().to_vec();

    let _ = filter_by_date(&table, &DateRange::single_day(day(2018, 1, 2)));

    assert_eq!(table.rows(), before.as_slice());
}

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(Role::Seller.as_str(), "seller");
    assert_eq!(Role::Customer.to_string(), "customer");
}
