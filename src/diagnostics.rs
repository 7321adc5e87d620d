//! Non-fatal load diagnostics.
//!
//! Problems that skip a line or a file are collected here instead of travelling
//! the error path, and each one is logged through `tracing` as it happens.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningKind {
    /// A line that is not valid JSON for a log entry
    MalformedLine,
    /// An assistant entry whose timestamp is present but not RFC3339
    InvalidTimestamp,
    /// A file that could not be opened or read to the end
    FileError,
    /// A directory entry the walk could not visit
    WalkError,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadWarning {
    pub kind: WarningKind,
    pub path: PathBuf,
    pub line: Option<usize>,
    pub message: String,
}

impl LoadWarning {
    pub fn malformed_line(path: &Path, line: usize, message: impl fmt::Display) -> Self {
        Self {
            kind: WarningKind::MalformedLine,
            path: path.to_path_buf(),
            line: Some(line),
            message: message.to_string(),
        }
    }

    pub fn invalid_timestamp(path: &Path, line: usize, message: impl fmt::Display) -> Self {
        Self {
            kind: WarningKind::InvalidTimestamp,
            path: path.to_path_buf(),
            line: Some(line),
            message: message.to_string(),
        }
    }

    pub fn file_error(path: &Path, err: &anyhow::Error) -> Self {
        Self {
            kind: WarningKind::FileError,
            path: path.to_path_buf(),
            line: None,
            message: format!("{:#}", err),
        }
    }

    pub fn walk_error(path: &Path, err: &walkdir::Error) -> Self {
        Self {
            kind: WarningKind::WalkError,
            path: path.to_path_buf(),
            line: None,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match (self.kind, self.line) {
            (WarningKind::MalformedLine, Some(line)) => {
                write!(f, "skipping malformed JSON at {}:{}: {}", path, line, self.message)
            }
            (WarningKind::InvalidTimestamp, Some(line)) => {
                write!(f, "invalid timestamp at {}:{}: {}", path, line, self.message)
            }
            (WarningKind::WalkError, _) => write!(f, "error walking {}: {}", path, self.message),
            _ => write!(f, "error loading {}: {}", path, self.message),
        }
    }
}

/// Collects warnings for one load.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<LoadWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: LoadWarning) {
        warn!(
            kind = ?warning.kind,
            file = %warning.path.display(),
            line = ?warning.line,
            "{}",
            warning
        );
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<LoadWarning> {
        self.warnings
    }
}
