//! Report Demo: the dashboard as plain text
//!
//! Usage: report-demo <all_data.csv> [start YYYY-MM-DD] [end YYYY-MM-DD]
//!
//! Prints the same snapshot the HTTP service returns for that range.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use insights::{build_snapshot, CategoryRating, CityCount, Snapshot};
use rowtable::DateRange;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 4 {
        bail!(
            "Usage: {} <all_data.csv> [start YYYY-MM-DD] [end YYYY-MM-DD]",
            args.first().map_or("report-demo", String::as_str)
        );
    }

    let dataset = rowtable::load_csv(&args[1])
        .with_context(|| format!("Failed to load {}", args[1]))?;
    let table = &dataset.table;
    let full = table.full_range();

    let start = args.get(2).map(|s| parse_day(s)).transpose()?.unwrap_or(full.start());
    let end = args.get(3).map(|s| parse_day(s)).transpose()?.unwrap_or(full.end());
    let range = DateRange::new(start, end)?;

    println!("╔════════════════════════════════════════════════╗");
    println!("║  E-Commerce Public Dataset - Dashboard        ║");
    println!("╚════════════════════════════════════════════════╝\n");
    println!("   Dataset: {} ({} rows)", dataset.path.display(), table.len());
    println!("   Hash:    {}", hex::encode(dataset.content_hash));
    println!("   Span:    {full}");
    println!("   Range:   {range}\n");

    let dashboard = match build_snapshot(table, range) {
        Snapshot::NoData { .. } => {
            println!("Data on date not available");
            println!("Please enter the date correctly");
            return Ok(());
        }
        Snapshot::Ready { dashboard, .. } => dashboard,
    };

    println!("⏱  Seller Response Performance");
    println!("   ─────────────────────────────────");
    println!("   Average Response Performance: {:?}", dashboard.response.performance);
    println!("   Average Response in Hour:     {}", dashboard.response.average_hours);
    for c in &dashboard.response.categories {
        println!("   {:<20} {}", c.response_category, c.response_count);
    }
    println!();

    println!("⭐ Best and Worst Performing Product");
    println!("   ─────────────────────────────────");
    match (dashboard.reviews.best_rating, dashboard.reviews.average_rating) {
        (Some(best), Some(avg)) => {
            println!("   Best Rating:    {best}");
            println!("   Average Rating: {avg}");
        }
        _ => println!("   No reviews in range"),
    }
    print_ratings("Best", &dashboard.reviews.best_categories);
    print_ratings("Worst", &dashboard.reviews.worst_categories);
    println!();

    let locations = &dashboard.locations;
    println!("📍 Distribution of Sellers and Customers");
    println!("   ─────────────────────────────────");
    if let Some(city) = &locations.top_seller_city {
        println!("   Highest Sellers City Location:   {city}");
    }
    if let Some(city) = &locations.top_customer_city {
        println!("   Highest Customers City Location: {city}");
    }
    println!(
        "   Map points: {} sellers, {} customers",
        locations.seller_points.len(),
        locations.customer_points.len()
    );
    print_cities("Seller", &locations.seller_cities);
    print_cities("Customer", &locations.customer_cities);

    Ok(())
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {s}"))
}

fn print_ratings(label: &str, ratings: &[CategoryRating]) {
    println!("   {label}:");
    for r in ratings {
        println!("     {:<32} {:.2}", r.product_category, r.review_score);
    }
}

fn print_cities(label: &str, cities: &[CityCount]) {
    println!("   {label} Distribution:");
    for c in cities {
        println!("     {:<32} {}", c.city, c.users);
    }
}
