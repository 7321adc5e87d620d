use crate::config::ProcessingConfig;
use crate::diagnostics::{Diagnostics, LoadWarning};
use crate::models::*;
use crate::session_utils::SessionUtils;
use crate::timestamp_parser::TimestampParser;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Reads one JSONL log file into [`UsageRecord`]s.
///
/// A line that is not valid JSON, blank lines included, is skipped with a
/// warning. Entries that are not assistant messages with usage data are
/// skipped silently. A line longer
/// than `max_line_bytes`, or an I/O error, fails the whole file.
#[derive(Debug, Clone)]
pub struct RecordParser {
    buffer_size: usize,
    max_line_bytes: usize,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordParser {
    pub fn new() -> Self {
        Self::from_config(&ProcessingConfig::default())
    }

    pub fn from_config(config: &ProcessingConfig) -> Self {
        Self {
            buffer_size: config.buffer_size_bytes(),
            max_line_bytes: config.max_line_bytes(),
        }
    }

    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    pub fn max_line_bytes(&self) -> usize {
        self.max_line_bytes
    }

    pub fn parse_file(
        &self,
        file_path: &Path,
        bound: &DateBound,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<UsageRecord>> {
        let file = File::open(file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let reader = BufReader::with_capacity(self.buffer_size, file);

        let records = self.parse_reader(reader, file_path, bound, diagnostics)?;
        debug!(file = %file_path.display(), records = records.len(), "Parsed log file");
        Ok(records)
    }

    /// Parse lines from `reader`. `file_path` supplies the project/session and
    /// the location reported in warnings.
    pub fn parse_reader<R: BufRead>(
        &self,
        mut reader: R,
        file_path: &Path,
        bound: &DateBound,
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<UsageRecord>> {
        let (project, session) = SessionUtils::extract_project_session(file_path);
        let mut records = Vec::new();
        let mut line = Vec::new();
        let mut line_number = 0;

        loop {
            line.clear();
            let read = (&mut reader)
                .take(self.max_line_bytes as u64 + 2)
                .read_until(b'\n', &mut line)
                .with_context(|| format!("error reading file at line {}", line_number + 1))?;
            if read == 0 {
                break;
            }
            line_number += 1;

            if line.last() == Some(&b'\n') {
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
            }
            if line.len() > self.max_line_bytes {
                anyhow::bail!(
                    "line {} exceeds the {} byte line limit",
                    line_number,
                    self.max_line_bytes
                );
            }

            // A bare `null` line decodes to no entry and is skipped like any
            // out-of-scope entry.
            let entry: LogEntry = match serde_json::from_slice::<Option<LogEntry>>(&line) {
                Ok(Some(entry)) => entry,
                Ok(None) => continue,
                Err(err) => {
                    diagnostics.push(LoadWarning::malformed_line(file_path, line_number, err));
                    continue;
                }
            };

            if let Some(record) =
                Self::to_record(&entry, &project, &session, bound, file_path, line_number, diagnostics)
            {
                records.push(record);
            }
        }

        Ok(records)
    }

    fn to_record(
        entry: &LogEntry,
        project: &str,
        session: &str,
        bound: &DateBound,
        file_path: &Path,
        line_number: usize,
        diagnostics: &mut Diagnostics,
    ) -> Option<UsageRecord> {
        if !entry.is_assistant() {
            return None;
        }
        let usage = entry.usage()?;
        let raw_timestamp = entry.timestamp_str()?;

        let timestamp = match TimestampParser::parse(raw_timestamp) {
            Ok(ts) => ts,
            Err(err) => {
                diagnostics.push(LoadWarning::invalid_timestamp(
                    file_path,
                    line_number,
                    format!("{:#}", err),
                ));
                return None;
            }
        };

        if !bound.contains(&timestamp) {
            return None;
        }

        Some(UsageRecord::from_usage(
            timestamp,
            project,
            session,
            usage,
            entry.cost_usd.unwrap_or(0.0),
        ))
    }
}
