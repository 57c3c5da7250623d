use crate::error::Result;
use crate::session::YearReports;
use crate::types::{ComparisonSeries, PieSeries, RevenueTable};
use crate::util::{display_money, format_percent};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Tabled)]
pub struct ShareRow {
    #[tabled(rename = "Slice")]
    pub label: String,
    #[tabled(rename = "Revenue", display_with = "display_money")]
    pub value: f64,
    #[tabled(rename = "Share")]
    pub share: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct ComparisonRow {
    #[tabled(rename = "Year")]
    pub year: i32,
    #[tabled(rename = "Location A", display_with = "display_money")]
    pub a: f64,
    #[tabled(rename = "Location B", display_with = "display_money")]
    pub b: f64,
}

/// Column names of the ranked table CSV, matching `RankedRow`'s serde names.
const RANKED_HEADERS: [&str; 3] = ["Location", "Revenue", "Percent"];

/// JSON export document for one year plus the current comparison.
#[derive(Debug, Serialize)]
struct ExportBundle<'a> {
    #[serde(flatten)]
    year: &'a YearReports,
    comparison: Option<&'a ComparisonSeries>,
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_header_only(path: &Path, headers: &[&str]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(headers)?;
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Write the ranked table as CSV and the rest of the year's reports as JSON
/// into `dir`. Returns the paths written.
pub fn export_reports(
    dir: &Path,
    reports: &YearReports,
    comparison: Option<&ComparisonSeries>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let year = reports.table.year();

    let csv_path = dir.join(format!("revenue_by_location_{}.csv", year));
    match &reports.table {
        // No rows to serialize means no header either; write it by hand.
        RevenueTable::Empty { .. } => write_header_only(&csv_path, &RANKED_HEADERS)?,
        RevenueTable::Ranked { rows, .. } => write_csv(&csv_path, rows)?,
    }

    let json_path = dir.join(format!("report_{}.json", year));
    let bundle = ExportBundle {
        year: reports,
        comparison,
    };
    write_json(&json_path, &bundle)?;

    log::info!("Exported reports for {} to {}", year, dir.display());
    Ok(vec![csv_path, json_path])
}

pub fn share_rows(pie: &PieSeries) -> Vec<ShareRow> {
    let total = pie.total();
    pie.labels
        .iter()
        .zip(&pie.values)
        .map(|(label, value)| ShareRow {
            label: label.clone(),
            value: *value,
            share: format!("{}%", format_percent(*value, total)),
        })
        .collect()
}

pub fn comparison_rows(series: &ComparisonSeries) -> Vec<ComparisonRow> {
    series
        .years
        .iter()
        .zip(series.series_a.iter().zip(&series.series_b))
        .map(|(year, (a, b))| ComparisonRow {
            year: *year,
            a: *a,
            b: *b,
        })
        .collect()
}

pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}", render_table(rows, max_rows));
    if rows.len() > max_rows {
        println!("... {} more rows", rows.len() - max_rows);
    }
    println!();
}

pub fn print_year_reports(reports: &YearReports, max_rows: usize) {
    let year = reports.summary.year;
    println!("Summary Stats ({})", year);
    preview_table_rows(std::slice::from_ref(&reports.summary), 1);

    println!("Revenue by Location ({})", year);
    match &reports.table {
        RevenueTable::Empty { .. } => println!("No data for the selected year.\n"),
        RevenueTable::Ranked { rows, .. } => preview_table_rows(rows, max_rows),
    }

    println!("Revenue Share ({})", year);
    let shares = share_rows(&reports.pie);
    preview_table_rows(&shares, shares.len());
}

pub fn print_comparison(series: &ComparisonSeries) {
    println!("Location Comparison");
    println!("A: {}", series.label_a);
    println!("B: {}\n", series.label_b);
    let rows = comparison_rows(series);
    preview_table_rows(&rows, rows.len());
}
