use crate::aggregate::{bucket_top_n, rank, revenue_by_location, revenue_by_year, zero_filled};
use crate::types::{ComparisonSeries, Order, PieSeries, RankedRow, RevenueTable, YearSummary};
use crate::util::format_percent;
use std::collections::{BTreeSet, HashSet};

/// Ranked revenue-by-location table for `year`, with each location's share
/// of the year's total.
pub fn ranked_table(orders: &[Order], year: i32) -> RevenueTable {
    let ranked = rank(revenue_by_location(orders, year));
    if ranked.is_empty() {
        return RevenueTable::Empty { year };
    }
    let total: f64 = ranked.iter().map(|e| e.revenue).sum();
    let rows = ranked
        .into_iter()
        .map(|e| RankedRow {
            percent: format_percent(e.revenue, total),
            location: e.location,
            revenue: e.revenue,
        })
        .collect();
    RevenueTable::Ranked { year, rows }
}

pub fn summary(orders: &[Order], year: i32) -> YearSummary {
    let mut total_revenue = 0.0;
    let mut total_orders = 0usize;
    let mut locations: HashSet<&str> = HashSet::new();
    for o in orders.iter().filter(|o| o.year == year) {
        total_revenue += o.revenue;
        total_orders += 1;
        locations.insert(o.location_key.as_str());
    }
    YearSummary {
        year,
        total_revenue,
        total_orders,
        unique_locations: locations.len(),
    }
}

/// Revenue share slices for `year`: the `top_n` best locations plus an
/// overflow slice. Empty when the year has no orders.
pub fn pie_series(orders: &[Order], year: i32, top_n: usize, other_label: &str) -> PieSeries {
    let ranked = rank(revenue_by_location(orders, year));
    let (labels, values): (Vec<String>, Vec<f64>) = bucket_top_n(&ranked, top_n, other_label)
        .into_iter()
        .map(|e| (e.location, e.revenue))
        .unzip();
    PieSeries { labels, values }
}

/// Year-by-year revenue of two locations. The year axis covers every year in
/// `orders`, not just the years the two locations traded in.
pub fn comparison(orders: &[Order], location_a: &str, location_b: &str) -> ComparisonSeries {
    let years: Vec<i32> = orders
        .iter()
        .map(|o| o.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let series_a = zero_filled(&revenue_by_year(orders, location_a), &years);
    let series_b = zero_filled(&revenue_by_year(orders, location_b), &years);
    ComparisonSeries {
        label_a: location_a.to_string(),
        label_b: location_b.to_string(),
        years,
        series_a,
        series_b,
    }
}
