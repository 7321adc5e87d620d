//! Core Data Models
//!
//! This module defines the data structures that flow through the ccstats pipeline,
//! from raw JSONL lines to the summaries handed to the reporter.
//!
//! ## Data Flow
//!
//! 1. **Raw Data**: [`LogEntry`] - One deserialized line of a Claude Code JSONL log
//! 2. **Records**: [`UsageRecord`] - A qualifying assistant entry with its project/session
//! 3. **Summaries**: [`DailySummary`], [`SessionSummary`] - Grouped totals for reporting
//!
//! ## Core Types
//!
//! ### Log Line Structure
//! - [`LogEntry`] - Top-level line wrapper (type tag, timestamp, cost)
//! - [`MessageData`] - Nested message carrying the usage block
//! - [`UsageData`] - Token counts (input, output, cache creation, cache read)
//!
//! ### Filtering
//! - [`DateBound`] - Optional inclusive `[since, until]` window
//!
//! ## Features
//!
//! - **Tolerant Fields**: Missing or `null` values in a log line fall back to zero/empty
//! - **Derived Totals**: Summary `total_tokens` is always computed from its four components
//! - **Serde Integration**: Summaries serialize with the field names reporters expect

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The type tag carried by entries that record an assistant response.
pub const ASSISTANT_ENTRY_TYPE: &str = "assistant";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(rename = "costUSD", default)]
    pub cost_usd: Option<f64>,
    #[serde(default)]
    pub message: Option<MessageData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    pub usage: Option<UsageData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsageData {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default)]
    pub cache_read_input_tokens: Option<u64>,
}

impl LogEntry {
    pub fn is_assistant(&self) -> bool {
        self.entry_type.as_deref() == Some(ASSISTANT_ENTRY_TYPE)
    }

    pub fn usage(&self) -> Option<&UsageData> {
        self.message.as_ref().and_then(|m| m.usage.as_ref())
    }

    /// The raw timestamp, or `None` when absent or empty.
    pub fn timestamp_str(&self) -> Option<&str> {
        self.timestamp.as_deref().filter(|ts| !ts.is_empty())
    }
}

/// One assistant response's token and cost accounting.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub session: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_create_tokens: u64,
    pub cache_read_tokens: u64,
    pub cost_usd: f64,
}

impl UsageRecord {
    pub fn from_usage(
        timestamp: DateTime<Utc>,
        project: &str,
        session: &str,
        usage: &UsageData,
        cost_usd: f64,
    ) -> Self {
        Self {
            timestamp,
            project: project.to_string(),
            session: session.to_string(),
            input_tokens: usage.input_tokens.unwrap_or(0),
            output_tokens: usage.output_tokens.unwrap_or(0),
            cache_create_tokens: usage.cache_creation_input_tokens.unwrap_or(0),
            cache_read_tokens: usage.cache_read_input_tokens.unwrap_or(0),
            cost_usd,
        }
    }

    /// Sum of the four token counts, saturating at `u64::MAX`.
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cache_create_tokens)
            .saturating_add(self.cache_read_tokens)
    }
}

/// Usage totals for one local calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailySummary {
    pub date: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_create_tokens: u64,
    pub cache_read_tokens: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
}

/// Usage totals for one `project/session` pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SessionSummary {
    pub project: String,
    pub session: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_create_tokens: u64,
    pub cache_read_tokens: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub last_activity: DateTime<Utc>,
}

/// Inclusive time window. An absent side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBound {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateBound {
    pub fn new(since: Option<DateTime<Utc>>, until: Option<DateTime<Utc>>) -> Self {
        Self { since, until }
    }

    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = &self.since {
            if timestamp < since {
                return false;
            }
        }
        if let Some(until) = &self.until {
            if timestamp > until {
                return false;
            }
        }
        true
    }
}
