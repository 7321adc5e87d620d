//! Record loading
//!
//! Walks a root directory, parses every log file it finds one at a time, and
//! concatenates the results. Per-file and per-line problems become warnings in
//! the returned [`LoadReport`]; only a root that cannot be walked at all is an
//! error.

use crate::config::ProcessingConfig;
use crate::diagnostics::{Diagnostics, LoadWarning};
use crate::file_discovery::FileDiscovery;
use crate::models::{DateBound, UsageRecord};
use crate::parser::RecordParser;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Records found by one load, plus the warnings raised along the way.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<UsageRecord>,
    pub warnings: Vec<LoadWarning>,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordLoader {
    discovery: FileDiscovery,
    parser: RecordParser,
}

impl RecordLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self {
            discovery: FileDiscovery::from_config(config),
            parser: RecordParser::from_config(config),
        }
    }

    pub fn with_parser(mut self, parser: RecordParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn load(&self, root: &Path, bound: &DateBound) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let mut diagnostics = Diagnostics::new();

        for item in self.discovery.log_files(root) {
            let path = match item {
                Ok(path) => path,
                Err(err) if err.depth() == 0 => {
                    return Err(err)
                        .with_context(|| format!("Cannot walk data directory {}", root.display()));
                }
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    diagnostics.push(LoadWarning::walk_error(&path, &err));
                    continue;
                }
            };

            report.files_scanned += 1;
            match self.parser.parse_file(&path, bound, &mut diagnostics) {
                Ok(records) => report.records.extend(records),
                Err(err) => {
                    report.files_skipped += 1;
                    diagnostics.push(LoadWarning::file_error(&path, &err));
                }
            }
        }

        debug!(
            root = %root.display(),
            files_scanned = report.files_scanned,
            files_skipped = report.files_skipped,
            records = report.records.len(),
            warnings = diagnostics.len(),
            "Finished loading usage records"
        );

        report.warnings = diagnostics.into_warnings();
        Ok(report)
    }
}

/// Load every usage record under `root` that falls inside `bound`
pub fn load_usage_records(root: &Path, bound: &DateBound) -> Result<LoadReport> {
    RecordLoader::new().load(root, bound)
}
