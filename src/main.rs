use anyhow::{Context, Result};
use ccstats::analyzer::{ProcessOptions, ReportKind, UsageAnalyzer};
use ccstats::config;
use ccstats::logging;
use ccstats::models::DateBound;
use ccstats::timestamp_parser::TimestampParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "ccstats")]
#[command(about = "Analyze Claude Code usage from local JSONL files")]
#[command(
    long_about = "ccstats parses and aggregates usage data from ~/.claude/projects/**/*.jsonl files,\n\
                  providing daily and session-based usage/cost reports with table or JSON output."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to Claude projects directory [default: ~/.claude/projects]
    #[arg(long, global = true)]
    path: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Filter records since this date (YYYYMMDD)
    #[arg(long, global = true)]
    since: Option<String>,

    /// Filter records until midnight UTC starting this date (YYYYMMDD)
    #[arg(long, global = true)]
    until: Option<String>,

    /// Show only the N most recent rows
    #[arg(long, global = true)]
    limit: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate and display usage/cost by day
    Daily,
    /// Aggregate and display usage/cost by project and session
    Session,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::init_config()?;
    let _log_guard = logging::init_logging(&config.logging, &config.paths.log_directory);
    match &config.source {
        Some(path) => info!(config_file = %path.display(), "Loaded configuration from file"),
        None => debug!("No configuration file found, using defaults"),
    }

    let bound = parse_bound(cli.since.as_deref(), cli.until.as_deref())?;

    let kind = match cli.command {
        Commands::Daily => ReportKind::Daily,
        Commands::Session => ReportKind::Session,
    };

    let options = ProcessOptions {
        data_path: cli.path.unwrap_or_else(|| config.paths.default_data_path()),
        bound,
        json_output: cli.json,
        limit: cli.limit,
    };

    UsageAnalyzer::from_config(config).run_command(kind, &options)
}

fn parse_bound(since: Option<&str>, until: Option<&str>) -> Result<DateBound> {
    let since = since
        .filter(|s| !s.is_empty())
        .map(TimestampParser::start_of_day)
        .transpose()
        .context("invalid since date")?;
    let until = until
        .filter(|s| !s.is_empty())
        .map(TimestampParser::start_of_day)
        .transpose()
        .context("invalid until date")?;

    Ok(DateBound::new(since, until))
}
