//! ccstats Library
//!
//! Reads the append-only JSONL logs Claude Code keeps under `~/.claude/projects`
//! and turns them into daily or per-session usage reports: token counts by kind
//! and cost in US dollars.
//!
//! ## Architecture Overview
//!
//! Data flows one way, filesystem to terminal:
//!
//! - [`file_discovery`] - Recursive walk for `*.jsonl` files
//! - [`parser`] - Tolerant line-by-line parsing of one log file into [`UsageRecord`]s
//! - [`loader`] - Runs the parser over every discovered file, collecting warnings
//! - [`aggregator`] - Groups records by day or by project/session
//! - [`display`] - Aligned tables with a totals row, or indented JSON
//! - [`analyzer`] - Orchestrates one command run
//!
//! Supporting modules:
//!
//! - [`models`] - Records, summaries, and the date bound
//! - [`diagnostics`] - Non-fatal warnings raised while loading
//! - [`session_utils`] - Project/session extraction from file paths
//! - [`timestamp_parser`] - RFC3339 timestamps and `YYYYMMDD` filter dates
//! - [`config`] - Configuration with file and environment overrides
//! - [`logging`] - Structured logging through `tracing`
//!
//! ## Example
//!
//! ```no_run
//! use ccstats::aggregator::aggregate_daily;
//! use ccstats::loader::load_usage_records;
//! use ccstats::models::DateBound;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let load = load_usage_records(Path::new("/home/me/.claude/projects"), &DateBound::default())?;
//! for day in aggregate_daily(&load.records) {
//!     println!("{}: {} tokens, ${:.4}", day.date, day.total_tokens, day.total_cost);
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod display;
pub mod file_discovery;
pub mod loader;
pub mod logging;
pub mod models;
pub mod parser;
pub mod session_utils;
pub mod timestamp_parser;

pub use analyzer::UsageAnalyzer;
pub use models::*;
