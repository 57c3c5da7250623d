//! Row parser/validator: the only place where untyped rows become [`Order`]s.
use crate::error::{ReportError, Result};
use crate::types::{Order, RawRow};
use crate::util::{parse_date_safe, parse_f64_safe};
use chrono::Datelike;
use std::fmt;

pub const REQUIRED_COLUMNS: [&str; 4] = ["order_date", "revenue", "city", "state"];

/// Why a row was excluded. Rejections are counted, never propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rejection {
    InvalidDate,
    InvalidRevenue,
    NonPositiveRevenue,
    MissingCity,
    MissingState,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::InvalidDate => "order_date is missing or not a date",
            Rejection::InvalidRevenue => "revenue is missing or not a number",
            Rejection::NonPositiveRevenue => "revenue is not greater than zero",
            Rejection::MissingCity => "city is empty",
            Rejection::MissingState => "state is empty",
        };
        f.write_str(msg)
    }
}

/// Check the header row once, before any data row is looked at.
///
/// Missing columns are reported in the order of [`REQUIRED_COLUMNS`].
pub fn check_headers<'a, I>(headers: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = headers.into_iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReportError::MissingColumns(missing))
    }
}

/// Turn a raw row into an [`Order`], or say why it cannot be one.
pub fn validate(row: &RawRow) -> std::result::Result<Order, Rejection> {
    let order_date = parse_date_safe(row.order_date.as_deref()).ok_or(Rejection::InvalidDate)?;
    let revenue = parse_f64_safe(row.revenue.as_deref()).ok_or(Rejection::InvalidRevenue)?;
    if revenue <= 0.0 {
        return Err(Rejection::NonPositiveRevenue);
    }
    let city = non_empty(&row.city).ok_or(Rejection::MissingCity)?;
    let state = non_empty(&row.state).ok_or(Rejection::MissingState)?;

    Ok(Order {
        order_id: row.order_id.clone(),
        customer_id: row.customer_id.clone(),
        year: order_date.year(),
        order_date,
        revenue,
        location_key: location_key(city, state),
        city: city.to_string(),
        state: state.to_string(),
    })
}

/// Grouping identity of a location. Text is used as-is, so `"Lyon"` and
/// `"lyon "` are different locations.
pub fn location_key(city: &str, state: &str) -> String {
    format!("{}, {}", city, state)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
