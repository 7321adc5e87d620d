//! Usage Analysis Engine
//!
//! This module ties the pipeline together for one command run:
//!
//! 1. **Load**: [`RecordLoader`] walks the data directory and parses every log file
//! 2. **Empty check**: no records is a notice, not an error
//! 3. **Aggregate**: by day or by project/session
//! 4. **Limit**: optionally keep only the most recent rows
//! 5. **Display**: table or JSON through [`DisplayManager`]
//!
//! ## Usage Example
//!
//! ```no_run
//! use ccstats::analyzer::{ProcessOptions, ReportKind, UsageAnalyzer};
//! use ccstats::models::DateBound;
//!
//! # fn example() -> anyhow::Result<()> {
//! let analyzer = UsageAnalyzer::new();
//! let options = ProcessOptions {
//!     data_path: "/home/me/.claude/projects".into(),
//!     bound: DateBound::default(),
//!     json_output: false,
//!     limit: Some(7),
//! };
//!
//! analyzer.run_command(ReportKind::Daily, &options)?;
//! # Ok(())
//! # }
//! ```

use crate::aggregator::{aggregate_daily, aggregate_sessions};
use crate::config::Config;
use crate::display::DisplayManager;
use crate::loader::RecordLoader;
use crate::logging::run_span;
use crate::models::*;
use anyhow::Result;
use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// Notice printed when nothing matched.
pub const NO_RECORDS_NOTICE: &str = "No usage records found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Daily,
    Session,
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Daily => write!(f, "daily"),
            ReportKind::Session => write!(f, "session"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub data_path: PathBuf,
    pub bound: DateBound,
    pub json_output: bool,
    pub limit: Option<usize>,
}

/// Aggregated rows ready for display
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Daily(Vec<DailySummary>),
    Session(Vec<SessionSummary>),
}

impl Report {
    pub fn len(&self) -> usize {
        match self {
            Report::Daily(rows) => rows.len(),
            Report::Session(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keep the `limit` most recent rows without changing their order.
    pub fn limit(self, limit: Option<usize>) -> Self {
        let Some(limit) = limit else {
            return self;
        };
        match self {
            Report::Daily(mut rows) => {
                let skip = rows.len().saturating_sub(limit);
                rows.drain(..skip);
                Report::Daily(rows)
            }
            Report::Session(mut rows) => {
                rows.truncate(limit);
                Report::Session(rows)
            }
        }
    }
}

pub struct UsageAnalyzer {
    loader: RecordLoader,
    display_manager: DisplayManager,
}

impl Default for UsageAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl UsageAnalyzer {
    pub fn new() -> Self {
        Self {
            loader: RecordLoader::new(),
            display_manager: DisplayManager::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            loader: RecordLoader::from_config(&config.processing),
            display_manager: DisplayManager::from_config(&config.output),
        }
    }

    /// Load and aggregate. Returns `None` when no record matched.
    pub fn build_report(&self, kind: ReportKind, options: &ProcessOptions) -> Result<Option<Report>> {
        let load = self.loader.load(&options.data_path, &options.bound)?;

        info!(
            records = load.records.len(),
            files = load.files_scanned,
            warnings = load.warnings.len(),
            "Loaded usage records"
        );

        if load.is_empty() {
            return Ok(None);
        }

        let report = match kind {
            ReportKind::Daily => Report::Daily(aggregate_daily(&load.records)),
            ReportKind::Session => Report::Session(aggregate_sessions(&load.records)),
        };

        Ok(Some(report.limit(options.limit)))
    }

    pub fn run_command(&self, kind: ReportKind, options: &ProcessOptions) -> Result<()> {
        let span = run_span(&kind.to_string());
        let _entered = span.enter();

        let Some(report) = self.build_report(kind, options)? else {
            eprintln!("{}", NO_RECORDS_NOTICE.yellow());
            return Ok(());
        };

        match report {
            Report::Daily(rows) => self.display_manager.display_daily(&rows, options.json_output),
            Report::Session(rows) => self.display_manager.display_sessions(&rows, options.json_output),
        }
    }
}
