// Grouping and ranking of order revenue.
//
// Everything here is a pure function over a slice of orders; nothing is
// cached between calls.
use crate::types::{LocationRevenue, Order};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_OTHER_LABEL: &str = "Other";

/// Revenue per location for one year, in the order locations are first seen.
pub fn revenue_by_location(orders: &[Order], year: i32) -> Vec<LocationRevenue> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<LocationRevenue> = Vec::new();
    for o in orders.iter().filter(|o| o.year == year) {
        match index.get(o.location_key.as_str()) {
            Some(&i) => out[i].revenue += o.revenue,
            None => {
                index.insert(o.location_key.as_str(), out.len());
                out.push(LocationRevenue {
                    location: o.location_key.clone(),
                    revenue: o.revenue,
                });
            }
        }
    }
    out
}

/// Sort by revenue, highest first. The sort is stable, so equal revenues
/// keep their grouping order.
pub fn rank(mut entries: Vec<LocationRevenue>) -> Vec<LocationRevenue> {
    entries.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
    entries
}

/// Keep the first `n` ranked entries and fold the rest into one
/// `other_label` entry. The overflow entry is only added when its sum is
/// strictly positive.
pub fn bucket_top_n(ranked: &[LocationRevenue], n: usize, other_label: &str) -> Vec<LocationRevenue> {
    let split = n.min(ranked.len());
    let (top, rest) = ranked.split_at(split);
    let mut out = top.to_vec();
    let other: f64 = rest.iter().map(|e| e.revenue).sum();
    if other > 0.0 {
        out.push(LocationRevenue {
            location: other_label.to_string(),
            revenue: other,
        });
    }
    out
}

/// Revenue per year for one location. Only years with orders appear.
pub fn revenue_by_year(orders: &[Order], location: &str) -> BTreeMap<i32, f64> {
    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for o in orders.iter().filter(|o| o.location_key == location) {
        *by_year.entry(o.year).or_insert(0.0) += o.revenue;
    }
    by_year
}

/// Align a per-year map to `axis`, using `0` for years without orders.
pub fn zero_filled(by_year: &BTreeMap<i32, f64>, axis: &[i32]) -> Vec<f64> {
    axis.iter()
        .map(|y| by_year.get(y).copied().unwrap_or(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::location_key;
    use chrono::{Datelike, NaiveDate};

    fn order(year: i32, city: &str, revenue: f64) -> Order {
        let order_date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        Order {
            order_id: None,
            customer_id: None,
            order_date,
            year: order_date.year(),
            revenue,
            city: city.into(),
            state: "FR".into(),
            location_key: location_key(city, "FR"),
        }
    }

    fn entry(location: &str, revenue: f64) -> LocationRevenue {
        LocationRevenue {
            location: location.into(),
            revenue,
        }
    }

    #[test]
    fn sums_within_the_selected_year_only() {
        let orders = vec![
            order(2023, "Lyon", 100.0),
            order(2023, "Paris", 300.0),
            order(2023, "Lyon", 20.0),
            order(2024, "Lyon", 50.0),
        ];
        let grouped = revenue_by_location(&orders, 2023);
        assert_eq!(grouped, vec![entry("Lyon, FR", 120.0), entry("Paris, FR", 300.0)]);
        assert!(revenue_by_location(&orders, 1999).is_empty());
    }

    #[test]
    fn ranking_is_descending_and_stable_on_ties() {
        let ranked = rank(vec![
            entry("A", 10.0),
            entry("B", 50.0),
            entry("C", 10.0),
            entry("D", 50.0),
        ]);
        let names: Vec<&str> = ranked.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A", "C"]);
    }

    #[test]
    fn overflow_beyond_top_n_becomes_other() {
        let mut revenues: Vec<f64> = (1..=10).rev().map(|i| i as f64 * 10.0).collect();
        revenues.extend([1.0, 1.0]);
        let ranked: Vec<LocationRevenue> = revenues
            .iter()
            .enumerate()
            .map(|(i, r)| entry(&format!("L{}", i), *r))
            .collect();

        let slices = bucket_top_n(&ranked, DEFAULT_TOP_N, DEFAULT_OTHER_LABEL);
        assert_eq!(slices.len(), 11);
        assert_eq!(&slices[..10], &ranked[..10]);
        assert_eq!(slices[10], entry("Other", 2.0));
    }

    #[test]
    fn no_other_bucket_with_ten_or_fewer_entries() {
        let ranked: Vec<LocationRevenue> = (0..10).map(|i| entry(&format!("L{}", i), 5.0)).collect();
        assert_eq!(bucket_top_n(&ranked, 10, "Other").len(), 10);
        assert_eq!(bucket_top_n(&ranked[..3], 10, "Other").len(), 3);
        assert!(bucket_top_n(&[], 10, "Other").is_empty());
    }

    #[test]
    fn zero_overflow_adds_no_slice() {
        let mut ranked: Vec<LocationRevenue> = (0..10).map(|i| entry(&format!("L{}", i), 5.0)).collect();
        ranked.push(entry("Z", 0.0));
        assert_eq!(bucket_top_n(&ranked, 10, "Other").len(), 10);
    }

    #[test]
    fn by_year_series_is_zero_filled_on_the_global_axis() {
        let orders = vec![
            order(2021, "Lyon", 10.0),
            order(2023, "Lyon", 5.0),
            order(2023, "Lyon", 7.5),
            order(2022, "Paris", 99.0),
        ];
        let by_year = revenue_by_year(&orders, "Lyon, FR");
        assert_eq!(by_year.len(), 2);
        assert_eq!(zero_filled(&by_year, &[2021, 2022, 2023]), vec![10.0, 0.0, 12.5]);
        assert_eq!(
            zero_filled(&revenue_by_year(&orders, "Nowhere, XX"), &[2021, 2022]),
            vec![0.0, 0.0]
        );
    }
}
