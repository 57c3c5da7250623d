use crate::error::{ReportError, Result};
use crate::types::{Order, RawRow};
use crate::validate::{check_headers, validate, Rejection};
use csv::ReaderBuilder;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub valid_rows: usize,
    pub rejected_rows: usize,
    pub rejections: BTreeMap<Rejection, usize>,
}

pub fn load_path(path: &Path, delimiter: u8) -> Result<(Vec<Order>, LoadReport)> {
    let file = File::open(path)?;
    log::info!("Loading orders from {}", path.display());
    load_orders(BufReader::new(file), delimiter)
}

/// Parse and validate a whole table.
///
/// Header problems, malformed input and an empty result are fatal; bad rows
/// are dropped and counted in the returned [`LoadReport`].
pub fn load_orders<R: Read>(reader: R, delimiter: u8) -> Result<(Vec<Order>, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    check_headers(headers.iter())?;

    let mut report = LoadReport::default();
    let mut orders: Vec<Order> = Vec::new();

    for result in rdr.records() {
        let record = result?;
        report.total_rows += 1;
        let row: RawRow = record.deserialize(Some(&headers))?;
        match validate(&row) {
            Ok(order) => orders.push(order),
            Err(reason) => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                log::debug!("Skipping line {}: {}", line, reason);
                *report.rejections.entry(reason).or_insert(0) += 1;
                report.rejected_rows += 1;
            }
        }
    }

    report.valid_rows = orders.len();
    if report.rejected_rows > 0 {
        log::warn!(
            "{} of {} rows skipped due to invalid data",
            report.rejected_rows,
            report.total_rows
        );
    }
    if orders.is_empty() {
        return Err(ReportError::NoValidData);
    }
    log::info!("Loaded {} valid orders", report.valid_rows);
    Ok((orders, report))
}
