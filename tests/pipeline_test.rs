//! End-to-end checks: CSV file on disk → dashboard → reports.

use pretty_assertions::assert_eq;
use revenue_report::loader::load_path;
use revenue_report::{Dashboard, RankedRow, ReportConfig, ReportError, RevenueTable, YearSummary};
use std::io::Write;
use tempfile::NamedTempFile;

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn loaded(content: &str) -> Dashboard {
    let file = csv_file(content);
    let mut dash = Dashboard::new(ReportConfig::default()).unwrap();
    dash.ingest_path(file.path()).unwrap();
    dash
}

const LYON_PARIS: &str = "\
order_id,customer_id,order_date,revenue,city,state
1,10,2023-01-01,100,Lyon,FR
2,11,2023-02-01,300,Paris,FR
3,12,2024-01-01,50,Lyon,FR
";

#[test]
fn lyon_paris_scenario() {
    let mut dash = loaded(LYON_PARIS);
    assert_eq!(dash.repository().years(), vec![2024, 2023]);

    let reports = dash.select_year(2023);
    assert_eq!(
        reports.table,
        RevenueTable::Ranked {
            year: 2023,
            rows: vec![
                RankedRow {
                    location: "Paris, FR".into(),
                    revenue: 300.0,
                    percent: "75.00".into(),
                },
                RankedRow {
                    location: "Lyon, FR".into(),
                    revenue: 100.0,
                    percent: "25.00".into(),
                },
            ],
        }
    );
    assert_eq!(
        reports.summary,
        YearSummary {
            year: 2023,
            total_revenue: 400.0,
            total_orders: 2,
            unique_locations: 2,
        }
    );
}

#[test]
fn only_invalid_rows_is_reported_as_no_valid_data() {
    let file = csv_file(
        "order_date,revenue,city,state\n2023-01-01,-5,Lyon,FR\nnot-a-date,10,Lyon,FR\n",
    );
    let mut dash = Dashboard::default();
    let err = dash.ingest_path(file.path()).unwrap_err();
    assert!(matches!(err, ReportError::NoValidData));
    assert!(!dash.is_loaded());
}

#[test]
fn missing_columns_are_named() {
    let file = csv_file("order_date,amount,town\n2023-01-01,10,Lyon\n");
    match load_path(file.path(), b',') {
        Err(ReportError::MissingColumns(cols)) => {
            assert_eq!(cols, vec!["revenue", "city", "state"]);
        }
        other => panic!("expected missing columns, got {:?}", other.map(|(_, r)| r)),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let mut dash = Dashboard::default();
    let err = dash
        .ingest_path(std::path::Path::new("/nonexistent/orders-12345.csv"))
        .unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));
}

#[test]
fn every_loaded_order_is_valid() {
    let dash = loaded(
        "order_date,revenue,city,state\n\
         2023-01-01,10,A,X\n\
         2023-01-02,0,B,X\n\
         2023-01-03,abc,C,X\n\
         2023-01-04,5,,X\n\
         2023-01-05,5,D,\n\
         bad,5,E,X\n\
         2022-12-31,\"1,250.75\",F,X\n",
    );
    let orders = dash.repository().orders();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o.revenue > 0.0));
    assert_eq!(dash.repository().locations(), vec!["A, X", "F, X"]);
    assert_eq!(orders[1].revenue, 1250.75);
}

#[test]
fn twelve_locations_fold_into_ten_plus_other() {
    let mut content = String::from("order_date,revenue,city,state\n");
    let revenues = [100, 90, 80, 70, 60, 50, 40, 30, 20, 10, 1, 1];
    for (i, r) in revenues.iter().enumerate() {
        content.push_str(&format!("2023-06-01,{},City{:02},ST\n", r, i));
    }
    let mut dash = loaded(&content);
    let pie = dash.select_year(2023).pie;

    assert_eq!(pie.labels.len(), 11);
    assert_eq!(pie.values.len(), 11);
    assert_eq!(pie.labels[9], "City09, ST");
    assert_eq!(pie.labels[10], "Other");
    assert_eq!(pie.values[10], 2.0);
}

#[test]
fn comparison_arrays_align_with_global_years() {
    let mut dash = loaded(
        "order_date,revenue,city,state\n\
         2021-03-01,10,Lyon,FR\n\
         2022-03-01,20,Paris,FR\n\
         2023-03-01,30,Nice,FR\n",
    );
    let cmp = dash.select_pair("Lyon, FR", "Paris, FR");
    assert_eq!(cmp.years, vec![2021, 2022, 2023]);
    assert_eq!(cmp.series_a, vec![10.0, 0.0, 0.0]);
    assert_eq!(cmp.series_b, vec![0.0, 20.0, 0.0]);
    assert_eq!(cmp.years.len(), cmp.series_a.len());
    assert_eq!(cmp.years.len(), cmp.series_b.len());
}

#[test]
fn export_round_trip_through_files() {
    let mut dash = loaded(LYON_PARIS);
    let reports = dash.select_year(2024);
    let dir = tempfile::tempdir().unwrap();
    let written =
        revenue_report::output::export_reports(dir.path(), &reports, None).unwrap();
    assert!(written.iter().all(|p| p.exists()));
    assert!(written[0].ends_with("revenue_by_location_2024.csv"));
    assert!(written[1].ends_with("report_2024.json"));
}
