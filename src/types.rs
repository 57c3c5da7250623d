use crate::util::display_money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// One data row as it comes out of the CSV reader, before validation.
///
/// Every column is optional so that ragged rows and absent optional columns
/// deserialize; the validator decides what is acceptable.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub revenue: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// A validated order. Built only by [`crate::validate::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub order_date: NaiveDate,
    pub year: i32,
    pub revenue: f64,
    pub city: String,
    pub state: String,
    pub location_key: String,
}

/// Summed revenue for one location, as produced by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRevenue {
    pub location: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct RankedRow {
    #[serde(rename = "Location")]
    #[tabled(rename = "Location")]
    pub location: String,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue", display_with = "display_money")]
    pub revenue: f64,
    #[serde(rename = "Percent")]
    #[tabled(rename = "Percent")]
    pub percent: String,
}

/// Revenue-by-location table for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RevenueTable {
    /// The year has no orders; shown as a placeholder, not an error.
    Empty { year: i32 },
    Ranked { year: i32, rows: Vec<RankedRow> },
}

impl RevenueTable {
    pub fn year(&self) -> i32 {
        match self {
            RevenueTable::Empty { year } | RevenueTable::Ranked { year, .. } => *year,
        }
    }

    pub fn rows(&self) -> &[RankedRow] {
        match self {
            RevenueTable::Empty { .. } => &[],
            RevenueTable::Ranked { rows, .. } => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RevenueTable::Empty { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct YearSummary {
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "TotalRevenue", display_with = "display_money")]
    pub total_revenue: f64,
    #[tabled(rename = "TotalOrders")]
    pub total_orders: usize,
    #[tabled(rename = "UniqueLocations")]
    pub unique_locations: usize,
}

/// Slices of the revenue share chart. `labels` and `values` are parallel.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PieSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl PieSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Year-by-year revenue of two locations over the global year axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSeries {
    pub label_a: String,
    pub label_b: String,
    pub years: Vec<i32>,
    pub series_a: Vec<f64>,
    pub series_b: Vec<f64>,
}
