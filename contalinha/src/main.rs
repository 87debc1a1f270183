//! # contalinha
//!
//! A CLI for counting blank, comment, code and billable lines across a
//! directory tree, in any language.
//!
//! ## Overview
//!
//! contalinha is built on top of contalinhalib. It scans a directory, prints a
//! summary and a per-extension breakdown, and saves both plus the per-file
//! detail to a timestamped CSV (`result_YYYY-MM-DD-HH-MM.csv`).
//!
//! ## Usage
//!
//! ```bash
//! # Count lines under a directory (prompts for one when omitted)
//! contalinha ./project
//!
//! # Also list every file, sorted extensions by code lines
//! contalinha ./project --by-file --sort code
//!
//! # Output as JSON, skip the CSV file
//! contalinha ./project --output json --no-csv
//!
//! # Filter files with glob patterns
//! contalinha ./project --include "src/**" --exclude "**/vendor/**"
//! ```
//!
//! Set `CONTALINHA_LOG` (for example `CONTALINHA_LOG=debug`) to see
//! per-file diagnostics on stderr.

mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::Style;
use contalinhalib::output::write_csv;
use contalinhalib::{
    count_directory, export_csv, CountOptions, CountQuerySet, FilterConfig, OrderBy, Ordering,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "CONTALINHA_LOG";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("contalinha")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Counts blank, comment, code and billable lines in a directory tree")
        .arg(
            Arg::new("path")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory to analyze (prompted for when omitted)"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern (relative to the directory)"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern (relative to the directory)"),
        )
        .arg(
            Arg::new("follow-links")
                .long("follow-links")
                .action(ArgAction::SetTrue)
                .help("Follow symbolic links"),
        )
        .arg(
            Arg::new("by-file")
                .short('f')
                .long("by-file")
                .action(ArgAction::SetTrue)
                .help("Also list every file"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_parser(OrderBy::NAMES.to_vec())
                .default_value("files")
                .help("Column to sort extensions by"),
        )
        .arg(
            Arg::new("asc")
                .long("asc")
                .action(ArgAction::SetTrue)
                .help("Sort extensions in ascending order"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["table", "json", "csv"])
                .default_value("table")
                .help("Output format"),
        )
        .arg(
            Arg::new("csv-dir")
                .long("csv-dir")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(".")
                .help("Directory where the timestamped CSV file is saved"),
        )
        .arg(
            Arg::new("no-csv")
                .long("no-csv")
                .action(ArgAction::SetTrue)
                .help("Do not save the CSV file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Show debug diagnostics on stderr"),
        )
}

/// Install the stderr log subscriber.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Ask for a directory on stdin.
fn prompt_for_path() -> anyhow::Result<PathBuf> {
    let mut stderr = io::stderr();
    write!(stderr, "Directory to analyze: ")?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read directory from stdin")?;

    let path = line.trim();
    if path.is_empty() {
        bail!("no directory given");
    }
    Ok(PathBuf::from(path))
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

/// Build extension ordering from matches
fn build_ordering(matches: &ArgMatches) -> anyhow::Result<Ordering> {
    let by = match matches.get_one::<String>("sort") {
        Some(name) => OrderBy::from_str(name).map_err(anyhow::Error::msg)?,
        None => OrderBy::default(),
    };
    let ordering = Ordering::by(by);
    Ok(if matches.get_flag("asc") {
        ordering.ascending()
    } else {
        ordering
    })
}

/// Handler for a counting run
fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let started = Local::now();

    let path = match matches.get_one::<PathBuf>("path") {
        Some(path) => path.clone(),
        None => prompt_for_path()?,
    };

    let options = CountOptions::new()
        .filter(build_filter(matches)?)
        .follow_links(matches.get_flag("follow-links"));
    let ordering = build_ordering(matches)?;

    debug!(path = %path.display(), ?ordering, "starting count");
    let result = count_directory(&path, &options)?;
    let queryset = CountQuerySet::from_result(&result, ordering);

    let output = matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("table");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match output {
        "json" => {
            serde_json::to_writer_pretty(&mut out, &result)?;
            writeln!(out)?;
        }
        "csv" => write_csv(&result, &mut out)?,
        _ => write!(
            out,
            "{}",
            render::render_report(&result, &queryset, matches.get_flag("by-file"))
        )?,
    }
    out.flush()?;

    if !matches.get_flag("no-csv") {
        let dir = matches
            .get_one::<PathBuf>("csv-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));
        let saved = export_csv(&result, &dir, started)?;
        eprintln!(
            "{} {}",
            Style::new().green().apply_to("Results saved to"),
            saved.display()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
