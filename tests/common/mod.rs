#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub fn create_test_jsonl(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// `<root>/projects/<project>/<session>`, created on disk
pub fn session_dir(root: &Path, project: &str, session: &str) -> Result<PathBuf> {
    let dir = root.join("projects").join(project).join(session);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// One assistant log line with usage data
pub fn assistant_line(timestamp: &str, input: u64, output: u64, cache_create: u64, cache_read: u64, cost: f64) -> String {
    format!(
        r#"{{"type":"assistant","timestamp":"{}","costUSD":{},"message":{{"id":"msg","model":"claude-sonnet-4-20250514","usage":{{"input_tokens":{},"output_tokens":{},"cache_creation_input_tokens":{},"cache_read_input_tokens":{}}}}}}}"#,
        timestamp, cost, input, output, cache_create, cache_read
    )
}

pub fn user_line(timestamp: &str) -> String {
    format!(
        r#"{{"type":"user","timestamp":"{}","costUSD":1.0,"message":{{"usage":{{"input_tokens":500,"output_tokens":500,"cache_creation_input_tokens":0,"cache_read_input_tokens":0}}}}}}"#,
        timestamp
    )
}

pub fn lines(lines: &[String]) -> String {
    let mut content = lines.join("\n");
    content.push('\n');
    content
}
