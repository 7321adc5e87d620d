use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Handles the two time formats ccstats reads: RFC3339 record timestamps and
/// compact `YYYYMMDD` filter dates.
pub struct TimestampParser;

impl TimestampParser {
    /// Parse an RFC3339 timestamp (`Z` or numeric offset) into UTC.
    pub fn parse(timestamp_str: &str) -> Result<DateTime<Utc>> {
        let dt = DateTime::parse_from_rfc3339(timestamp_str)
            .with_context(|| format!("Failed to parse timestamp: {}", timestamp_str))?;
        Ok(dt.with_timezone(&Utc))
    }

    /// Parse a `YYYYMMDD` filter date.
    pub fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
        if date_str.len() != 8 || !date_str.bytes().all(|b| b.is_ascii_digit()) {
            anyhow::bail!("expected YYYYMMDD, got {:?}", date_str);
        }
        NaiveDate::parse_from_str(date_str, "%Y%m%d")
            .with_context(|| format!("{:?} is not a calendar date", date_str))
    }

    /// Midnight at the start of the filter day, in UTC. Used for both `--since`
    /// and `--until`.
    pub fn start_of_day(date_str: &str) -> Result<DateTime<Utc>> {
        let date = Self::parse_filter_date(date_str)?;
        Ok(date.and_time(NaiveTime::MIN).and_utc())
    }
}
