//! CLI entry point for the EDA profiler.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use eda_profiler::{
    DEFAULT_REPORT_TITLE, DataProfiler, Dataset, ProfileConfig, ProfileConfigBuilder,
    ProfileReport, ReportFormat, ReportGenerator,
};
use std::path::PathBuf;
use tracing::{error, info};

/// CLI-compatible report format enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    /// Structured JSON report
    Json,
    /// Self-contained HTML page
    Html,
    /// Both JSON and HTML, sharing the output file stem
    Both,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(cli: CliReportFormat) -> Self {
        match cli {
            CliReportFormat::Json => ReportFormat::Json,
            CliReportFormat::Html => ReportFormat::Html,
            CliReportFormat::Both => ReportFormat::Both,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Automated Exploratory Data Analysis for CSV files",
    long_about = "Profiles a CSV file and writes a report covering descriptive statistics,\n\
                  missing values, categorical cardinality, correlations and IQR outliers.\n\n\
                  EXAMPLES:\n  \
                  # JSON report next to the data\n  \
                  eda-profiler -f data.csv -o data_report.json\n\n  \
                  # JSON and HTML side by side\n  \
                  eda-profiler -f data.csv -o reports/data --format both\n\n  \
                  # Pipe the report to another tool\n  \
                  eda-profiler -f data.csv --json | jq .summary"
)]
struct Args {
    /// Path to the CSV file to profile
    #[arg(short, long)]
    file: PathBuf,

    /// Output path for the report
    ///
    /// With `--format both`, the `.json` and `.html` files share this stem
    #[arg(short, long, default_value = "eda_report.json")]
    output: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    format: CliReportFormat,

    /// Report title
    #[arg(long, default_value = DEFAULT_REPORT_TITLE)]
    title: String,

    /// JSON file with profiling settings
    ///
    /// Flags given on the command line override values from this file
    #[arg(long)]
    config: Option<PathBuf>,

    /// IQR multiplier for outlier fences
    #[arg(long)]
    iqr_multiplier: Option<f64>,

    /// Number of most frequent values to report per categorical column
    #[arg(long)]
    top_values: Option<usize>,

    /// Field delimiter of the input file
    #[arg(long)]
    delimiter: Option<char>,

    /// Print the JSON report to stdout instead of writing files
    ///
    /// Disables all logs; only the report is written to stdout.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge the optional config file with command line overrides.
fn build_config(args: &Args) -> Result<ProfileConfig> {
    let base = match &args.config {
        Some(path) => ProfileConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ProfileConfig::default(),
    };

    let mut builder = ProfileConfigBuilder::from_config(base);
    if let Some(multiplier) = args.iqr_multiplier {
        builder = builder.iqr_multiplier(multiplier);
    }
    if let Some(count) = args.top_values {
        builder = builder.top_values(count);
    }
    if let Some(delimiter) = args.delimiter {
        builder = builder.delimiter(delimiter);
    }

    Ok(builder.build()?)
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;

    let dataset = Dataset::load_csv(&args.file, &config)?;
    let profile = DataProfiler::profile_dataset(&dataset, &config)?;
    let report = ReportGenerator::assemble(
        profile,
        &args.file.display().to_string(),
        &args.title,
    );

    if args.json {
        println!("{}", ReportGenerator::to_json(&report)?);
        return Ok(());
    }

    let written = ReportGenerator::write_report(&report, &args.output, args.format.into())?;
    info!("EDA complete");

    print_summary(&report, &written);
    Ok(())
}

/// Print a quick summary of the report to stdout.
///
/// This output is intentionally independent of the log level.
fn print_summary(report: &ProfileReport, written: &[PathBuf]) {
    println!();
    println!("{}", "=".repeat(60));
    println!("EDA SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Input:              {}", report.input_file);
    println!("Rows:               {}", report.shape.rows);
    println!("Columns:            {}", report.shape.columns);
    println!(
        "Missing values:     {} ({:.1}% of cells)",
        report.summary.total_missing, report.summary.total_missing_percentage
    );
    println!("Outliers detected:  {}", report.summary.total_outliers);
    for path in written {
        println!("Report:             {}", path.display());
    }
    println!("{}", "=".repeat(60));
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    run(&args).inspect_err(|e| error!("EDA failed: {:#}", e))
}
