// The dashboard: one owner for the loaded orders and the current selections.
//
// Flow is "load once, then re-derive on each selection change". A year change
// rebuilds the table, summary and pie series; a location-pair change rebuilds
// only the comparison series. Any failed ingestion puts the dashboard back
// into its empty state.
use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::{load_orders, load_path, LoadReport};
use crate::reports;
use crate::repository::OrderRepository;
use crate::types::{ComparisonSeries, Order, PieSeries, RevenueTable, YearSummary};
use serde::Serialize;
use std::io::Read;
use std::path::Path;

/// Everything that depends on the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearReports {
    pub table: RevenueTable,
    pub summary: YearSummary,
    pub pie: PieSeries,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    config: ReportConfig,
    repo: OrderRepository,
    year: Option<i32>,
    pair: Option<(String, String)>,
}

impl Dashboard {
    /// A dashboard with no data loaded. The config is checked here so that
    /// ingestion never sees an invalid one.
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn repository(&self) -> &OrderRepository {
        &self.repo
    }

    pub fn is_loaded(&self) -> bool {
        !self.repo.is_empty()
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.year
    }

    pub fn selected_pair(&self) -> Option<(&str, &str)> {
        self.pair.as_ref().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn ingest_path(&mut self, path: &Path) -> Result<LoadReport> {
        let delimiter = self.config.delimiter_byte()?;
        let loaded = load_path(path, delimiter);
        self.apply(loaded)
    }

    pub fn ingest_reader<R: Read>(&mut self, reader: R) -> Result<LoadReport> {
        let delimiter = self.config.delimiter_byte()?;
        let loaded = load_orders(reader, delimiter);
        self.apply(loaded)
    }

    fn apply(&mut self, loaded: Result<(Vec<Order>, LoadReport)>) -> Result<LoadReport> {
        match loaded {
            Ok((orders, report)) => {
                self.repo.load(orders);
                self.year = self.repo.years().first().copied();
                self.pair = self.repo.default_pair();
                Ok(report)
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    /// Drop all data and selections.
    pub fn reset(&mut self) {
        log::debug!("Resetting dashboard state");
        self.repo.clear();
        self.year = None;
        self.pair = None;
    }

    pub fn select_year(&mut self, year: i32) -> YearReports {
        self.year = Some(year);
        self.year_reports(year)
    }

    pub fn select_pair(&mut self, location_a: &str, location_b: &str) -> ComparisonSeries {
        self.pair = Some((location_a.to_string(), location_b.to_string()));
        reports::comparison(self.repo.orders(), location_a, location_b)
    }

    pub fn year_reports(&self, year: i32) -> YearReports {
        let orders = self.repo.orders();
        YearReports {
            table: reports::ranked_table(orders, year),
            summary: reports::summary(orders, year),
            pie: reports::pie_series(orders, year, self.config.top_n, &self.config.other_label),
        }
    }

    /// Reports for the current year selection, if there is one.
    pub fn current_year_reports(&self) -> Option<YearReports> {
        self.year.map(|y| self.year_reports(y))
    }

    /// Comparison for the current pair, if comparison is enabled.
    pub fn current_comparison(&self) -> Option<ComparisonSeries> {
        self.pair
            .as_ref()
            .map(|(a, b)| reports::comparison(self.repo.orders(), a, b))
    }
}
