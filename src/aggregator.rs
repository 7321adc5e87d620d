//! Usage Aggregation
//!
//! Folds [`UsageRecord`]s into summary rows. Both groupings collect into a
//! hash map and then sort the rows explicitly, so output order never depends on
//! map iteration order.
//!
//! - [`aggregate_daily`]: one [`DailySummary`] per local calendar day, ascending by date
//! - [`aggregate_sessions`]: one [`SessionSummary`] per `project/session`, most recent first
//! - [`filter_records_by_date`]: inclusive date-bound filter over loaded records

use crate::models::{DailySummary, DateBound, SessionSummary, UsageRecord};
use crate::session_utils::SessionUtils;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
struct UsageTotals {
    input_tokens: u64,
    output_tokens: u64,
    cache_create_tokens: u64,
    cache_read_tokens: u64,
    cost: f64,
}

impl UsageTotals {
    fn add(&mut self, record: &UsageRecord) {
        self.input_tokens = self.input_tokens.saturating_add(record.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(record.output_tokens);
        self.cache_create_tokens = self.cache_create_tokens.saturating_add(record.cache_create_tokens);
        self.cache_read_tokens = self.cache_read_tokens.saturating_add(record.cache_read_tokens);
        self.cost += record.cost_usd;
    }

    fn total_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cache_create_tokens)
            .saturating_add(self.cache_read_tokens)
    }
}

struct SessionAccumulator {
    project: String,
    session: String,
    totals: UsageTotals,
    last_activity: DateTime<Utc>,
}

/// Group records by calendar day in the local time zone.
pub fn aggregate_daily(records: &[UsageRecord]) -> Vec<DailySummary> {
    aggregate_daily_in(records, &Local)
}

/// Group records by calendar day in `tz`.
pub fn aggregate_daily_in<Tz: TimeZone>(records: &[UsageRecord], tz: &Tz) -> Vec<DailySummary> {
    let mut by_day: HashMap<String, UsageTotals> = HashMap::new();

    for record in records {
        let date = record
            .timestamp
            .with_timezone(tz)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();
        by_day.entry(date).or_default().add(record);
    }

    let mut summaries: Vec<DailySummary> = by_day
        .into_iter()
        .map(|(date, totals)| DailySummary {
            date,
            input_tokens: totals.input_tokens,
            output_tokens: totals.output_tokens,
            cache_create_tokens: totals.cache_create_tokens,
            cache_read_tokens: totals.cache_read_tokens,
            total_tokens: totals.total_tokens(),
            total_cost: totals.cost,
        })
        .collect();

    summaries.sort_by(|a, b| a.date.cmp(&b.date));
    summaries
}

/// Group records by `project/session`, most recently active first.
///
/// Rows with equal last activity are ordered by project, then session.
pub fn aggregate_sessions(records: &[UsageRecord]) -> Vec<SessionSummary> {
    let mut by_session: HashMap<String, SessionAccumulator> = HashMap::new();

    for record in records {
        let key = SessionUtils::session_key(&record.project, &record.session);
        let acc = by_session.entry(key).or_insert_with(|| SessionAccumulator {
            project: record.project.clone(),
            session: record.session.clone(),
            totals: UsageTotals::default(),
            last_activity: record.timestamp,
        });

        acc.totals.add(record);
        if record.timestamp > acc.last_activity {
            acc.last_activity = record.timestamp;
        }
    }

    let mut summaries: Vec<SessionSummary> = by_session
        .into_values()
        .map(|acc| SessionSummary {
            project: acc.project,
            session: acc.session,
            input_tokens: acc.totals.input_tokens,
            output_tokens: acc.totals.output_tokens,
            cache_create_tokens: acc.totals.cache_create_tokens,
            cache_read_tokens: acc.totals.cache_read_tokens,
            total_tokens: acc.totals.total_tokens(),
            total_cost: acc.totals.cost,
            last_activity: acc.last_activity,
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.last_activity
            .cmp(&a.last_activity)
            .then_with(|| a.project.cmp(&b.project))
            .then_with(|| a.session.cmp(&b.session))
    });
    summaries
}

/// Keep records inside `bound` (inclusive). An unbounded filter returns the
/// input unchanged.
pub fn filter_records_by_date(records: Vec<UsageRecord>, bound: &DateBound) -> Vec<UsageRecord> {
    if bound.is_unbounded() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| bound.contains(&record.timestamp))
        .collect()
}
