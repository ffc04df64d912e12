use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rtave::calendar::to_epoch_seconds;
use rtave::config::AppConfig;
use rtave::input::InputSource;
use rtave::parse::DateTimeParser;
use rtave::report::{write_report, ReportFormat, ReportOptions};
use rtave::run::{run_sources, RunOptions};
use rtave::DateLayout;

#[derive(Parser)]
#[command(name = "rtave")]
#[command(about = "Average elapsed run time of start/end timestamp records")]
#[command(version)]
struct Cli {
    /// Process all records, including runs of a day or more
    #[arg(short, long)]
    all: bool,

    /// Write one CSV row per input source
    #[arg(short, long)]
    csv: bool,

    /// Write the CSV header line
    #[arg(short, long)]
    title: bool,

    /// More detail (repeat for skipped-record and per-record logging)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write the final statistics as JSON
    #[arg(long, conflicts_with = "csv")]
    json: bool,

    /// Report destination (default stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log destination (default stderr)
    #[arg(short, long)]
    error: Option<PathBuf>,

    /// Overwrite existing --output/--error files
    #[arg(short, long)]
    force: bool,

    /// Path to configuration file (default ./rtave.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Parse one date/time string, print its fields and exit
    #[arg(long, value_name = "TEXT")]
    probe: Option<String>,

    /// Date layout hint for --probe (compact, month-first, day-first, year-first)
    #[arg(long, default_value = "month-first")]
    layout: DateLayout,

    /// Input files ("-" for stdin; none reads stdin)
    files: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::discover(cli.config.as_deref()).context("Failed to load config")?;

    let verbose = cli.verbose.max(config.report.verbose);
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| verbosity_level(verbose).to_string());

    // Initialize tracing
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&log_level)
            .with_context(|| format!("Invalid log level: {}", log_level))?,
    };

    let (writer, ansi) = match &cli.error {
        Some(path) => {
            let file = open_destination(path, cli.force)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(ansi))
            .init();
    }

    tracing::info!("Starting rtave v{}", env!("CARGO_PKG_VERSION"));

    let century = config.parse.century_rule();

    if let Some(text) = &cli.probe {
        let parser = DateTimeParser::new(cli.layout).with_century(century);
        let dt = parser
            .parse(text)
            .with_context(|| format!("Cannot parse {:?}", text))?;
        let seconds = to_epoch_seconds(&dt).with_context(|| format!("Cannot convert {:?}", text))?;

        println!("{:<20}: {}", "Layout", parser.layout());
        println!("{:<20}: {}", "Date/Time", dt);
        println!("{:<20}: {:02}", "Short Year", dt.short_year);
        println!("{:<20}: {:03}", "Milliseconds", dt.millisecond);
        println!("{:<20}: {}", "Epoch Seconds", seconds);
        return Ok(());
    }

    if let Some(path) = &cli.output {
        if path.exists() && !cli.force {
            bail!(
                "Output file {} already exists (use --force to overwrite)",
                path.display()
            );
        }
    }

    let options = RunOptions {
        allow_outliers: cli.all || config.report.all,
        century,
    };
    let sources = InputSource::from_args(&cli.files);

    let report = run_sources(&sources, &options)?;

    let format = if cli.json {
        ReportFormat::Json
    } else if cli.csv || config.report.csv {
        ReportFormat::Csv
    } else {
        ReportFormat::Text
    };
    let report_options = ReportOptions {
        format,
        title: cli.title || config.report.title,
        verbose,
    };

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(open_destination(path, cli.force)?)),
        None => Box::new(io::stdout().lock()),
    };
    write_report(&mut out, &report_options, &report.snapshots(), &report.totals)
        .context("Failed to write report")?;

    tracing::info!(
        "Done: {} of {} records selected",
        report.totals.selected_records,
        report.totals.total_records
    );

    Ok(())
}

/// Log level implied by the `-v` count.
fn verbosity_level(verbose: u8) -> &'static str {
    match verbose {
        0 | 1 => "error",
        2 => "warn",
        _ => "debug",
    }
}

/// Create `path` for writing. An existing file is only replaced with `force`.
fn open_destination(path: &Path, force: bool) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    options.open(path).with_context(|| {
        if path.exists() && !force {
            format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )
        } else {
            format!("Failed to create {}", path.display())
        }
    })
}
