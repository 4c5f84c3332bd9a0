//! gainbook - Compute realized capital gains from lot files.
//!
//! # Usage
//!
//! ```bash
//! gainbook FIFO acquisitions.csv disposals.csv
//! gainbook hifo buys.csv sells.csv --format json
//! ```

use crate::report::GainsReport;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gainbook_booking::book;
use gainbook_core::Method;
use gainbook_importer::{read_acquisitions, read_disposals, ImporterConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Output format for the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// Match disposals against acquisitions and report realized gains.
#[derive(Parser, Debug)]
#[command(name = "gainbook")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Lot selection method (FIFO or HIFO)
    #[arg(value_name = "METHOD")]
    pub method: Method,

    /// CSV file of acquisitions
    #[arg(value_name = "ACQUISITIONS_CSV")]
    pub acquisitions: PathBuf,

    /// CSV file of disposals
    #[arg(value_name = "DISPOSALS_CSV")]
    pub disposals: PathBuf,

    /// Output format (text or json)
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Date format (strftime-style)
    #[arg(long, default_value = "%Y-%m-%d")]
    pub date_format: String,

    /// CSV delimiter
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// CSV files have no header row
    #[arg(long)]
    pub no_header: bool,

    /// Fail if any units are left unmatched
    #[arg(long)]
    pub strict: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = ImporterConfig::csv()
        .date_format(&args.date_format)
        .delimiter(args.delimiter)
        .has_header(!args.no_header)
        .build();

    let acquisitions = read_acquisitions(&args.acquisitions, &config)?;
    let disposals = read_disposals(&args.disposals, &config)?;

    if !args.quiet {
        for warning in acquisitions.warnings.iter().chain(&disposals.warnings) {
            eprintln!("warning: {warning}");
        }
    }

    let outcome = book(acquisitions.records, disposals.records, args.method)
        .context("failed to match lots")?;
    let report = GainsReport::new(args.method, outcome)?;

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Text => report.write_text(&mut stdout)?,
        OutputFormat::Json => report.write_json(&mut stdout)?,
    }
    stdout.flush()?;

    let unmatched = &report.unmatched;
    if !unmatched.disposed_units.is_zero() && !args.quiet {
        eprintln!(
            "warning: {} disposed units have no matching acquisition",
            unmatched.disposed_units
        );
    }
    if !unmatched.acquired_units.is_zero() && !args.quiet {
        eprintln!(
            "warning: {} acquired units were not disposed of",
            unmatched.acquired_units
        );
    }

    if args.strict && !unmatched.is_empty() {
        eprintln!("error: unmatched units remain (--strict)");
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(args: &Args) {
    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(io::stderr)
            .init();
    } else {
        // Unmatched units are printed by `run` as `warning:` lines
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

/// Main entry point for the gainbook command.
///
/// Usage errors, including an unknown method, exit with status 2 before
/// any file is read.
pub fn main() -> ExitCode {
    let args = Args::parse();

    init_tracing(&args);

    match run(&args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
