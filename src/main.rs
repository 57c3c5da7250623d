// Entry point and high-level CLI flow.
//
// - Option [1] loads and validates a CSV file, printing diagnostics, then
//   shows the reports for the most recent year and the default location pair.
// - Option [2] switches the report year.
// - Option [3] switches the pair of locations being compared.
// - Option [4] exports the current reports to CSV and JSON.
//
// With `--batch` the same steps run once from the command-line flags.
use clap::Parser;
use revenue_report::config::ReportConfig;
use revenue_report::error::{ReportError, Result};
use revenue_report::output;
use revenue_report::session::Dashboard;
use revenue_report::util::format_int;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "revenue-report")]
#[command(about = "Revenue-by-location reports from a sales-order CSV export", long_about = None)]
struct Cli {
    /// CSV file with order_date, revenue, city and state columns
    input: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report year (defaults to the most recent year in the file)
    #[arg(short, long)]
    year: Option<i32>,

    /// Two locations to compare, as "City, State"
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    compare: Vec<String>,

    /// Named slices in the revenue share chart
    #[arg(long)]
    top_n: Option<usize>,

    /// Directory for exported reports
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Run once from the flags instead of showing the menu
    #[arg(long)]
    batch: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn build_config(cli: &Cli) -> Result<ReportConfig> {
    let mut config = ReportConfig::load(cli.config.as_deref())?;
    if let Some(n) = cli.top_n {
        config.top_n = n;
    }
    if let Some(dir) = &cli.export {
        config.export_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

/// Print a prompt and read one trimmed line from stdin. `None` at end of input.
fn read_line(label: &str) -> Option<String> {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    match io::stdin().read_line(&mut buf) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(buf.trim().to_string()),
    }
}

fn prompt(label: &str) -> String {
    read_line(label).unwrap_or_default()
}

/// Apply `--year` / `--compare` on top of the defaults chosen at load time.
fn apply_selection_flags(cli: &Cli, dash: &mut Dashboard) {
    if let Some(year) = cli.year {
        dash.select_year(year);
    }
    if let [a, b] = cli.compare.as_slice() {
        dash.select_pair(a, b);
    }
}

fn show_current(dash: &Dashboard) {
    let max_rows = dash.config().preview_rows;
    if let Some(reports) = dash.current_year_reports() {
        output::print_year_reports(&reports, max_rows);
    }
    match dash.current_comparison() {
        Some(series) => output::print_comparison(&series),
        None => println!("No locations to compare.\n"),
    }
}

/// Handle option [1]: load and validate a CSV file.
fn handle_load(dash: &mut Dashboard, path: &Path) -> bool {
    match dash.ingest_path(path) {
        Ok(report) => {
            println!(
                "Processing dataset... ({} rows read, {} valid orders)",
                format_int(report.total_rows),
                format_int(report.valid_rows)
            );
            if report.rejected_rows > 0 {
                println!(
                    "Note: {} rows skipped due to invalid data.",
                    format_int(report.rejected_rows)
                );
                for (reason, count) in &report.rejections {
                    println!("  - {}: {}", reason, format_int(*count));
                }
            }
            println!();
            true
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
            false
        }
    }
}

/// Handle option [2]: pick a year from the loaded data.
fn handle_select_year(dash: &mut Dashboard) {
    let years = dash.repository().years();
    let listed: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    println!("Available years: {}", listed.join(", "));
    let input = prompt("Enter year: ");
    match input.parse::<i32>() {
        Ok(year) => {
            let reports = dash.select_year(year);
            println!();
            output::print_year_reports(&reports, dash.config().preview_rows);
        }
        Err(_) => println!("Invalid year: {}\n", input),
    }
}

/// Resolve a menu answer to a location: either its number in the list or
/// the literal "City, State" text.
fn resolve_location(input: &str, locations: &[String]) -> Option<String> {
    if let Ok(n) = input.parse::<usize>() {
        return locations.get(n.checked_sub(1)?).cloned();
    }
    locations.iter().find(|l| l.as_str() == input).cloned()
}

/// Handle option [3]: pick two locations to compare.
fn handle_compare(dash: &mut Dashboard) {
    let locations = dash.repository().locations();
    for (i, loc) in locations.iter().enumerate() {
        println!("[{}] {}", i + 1, loc);
    }
    let first = prompt("Location 1: ");
    let second = prompt("Location 2: ");
    match (
        resolve_location(&first, &locations),
        resolve_location(&second, &locations),
    ) {
        (Some(a), Some(b)) => {
            let series = dash.select_pair(&a, &b);
            println!();
            output::print_comparison(&series);
        }
        _ => println!("Unknown location. Enter a number from the list or the exact name.\n"),
    }
}

/// Handle option [4]: export the current reports.
fn handle_export(dash: &Dashboard) {
    let dir = match &dash.config().export_dir {
        Some(dir) => dir.clone(),
        None => {
            let input = prompt("Export directory [reports]: ");
            PathBuf::from(if input.is_empty() { "reports" } else { input.as_str() })
        }
    };
    if let Err(e) = export_current(dash, &dir) {
        eprintln!("Write error: {}\n", e);
    }
}

fn export_current(dash: &Dashboard, dir: &Path) -> Result<()> {
    let reports = dash.current_year_reports().ok_or_else(|| {
        ReportError::Config("no report year selected; load a CSV file first".into())
    })?;
    let comparison = dash.current_comparison();
    for path in output::export_reports(dir, &reports, comparison.as_ref())? {
        println!("Saved {}", path.display());
    }
    println!();
    Ok(())
}

fn run_batch(cli: &Cli, dash: &mut Dashboard) -> Result<()> {
    let Some(path) = &cli.input else {
        return Err(ReportError::Config("--batch needs an input file".into()));
    };
    dash.ingest_path(path)?;
    apply_selection_flags(cli, dash);
    show_current(dash);
    if let Some(dir) = dash.config().export_dir.clone() {
        export_current(dash, &dir)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut dash = match build_config(&cli).and_then(Dashboard::new) {
        Ok(dash) => dash,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    if cli.batch {
        if let Err(e) = run_batch(&cli, &mut dash) {
            eprintln!("{}", e);
            process::exit(1);
        }
        return;
    }

    if let Some(path) = &cli.input {
        if handle_load(&mut dash, path) {
            apply_selection_flags(&cli, &mut dash);
            show_current(&dash);
        }
    }

    loop {
        println!("Select an option:");
        println!("[1] Load a file");
        println!("[2] Select year");
        println!("[3] Compare locations");
        println!("[4] Export reports");
        println!("[0] Exit\n");
        let Some(choice) = read_line("Enter choice: ") else {
            println!();
            break;
        };
        match choice.as_str() {
            "1" => {
                let path = prompt("CSV file: ");
                if handle_load(&mut dash, Path::new(&path)) {
                    show_current(&dash);
                }
            }
            "2" | "3" | "4" if !dash.is_loaded() => {
                println!("Error: No data loaded. Please load a CSV file first (option 1).\n");
            }
            "2" => handle_select_year(&mut dash),
            "3" => handle_compare(&mut dash),
            "4" => handle_export(&dash),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter 0-4.\n"),
        }
    }
}
