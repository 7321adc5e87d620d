//! Output Formatting and Display Management
//!
//! This module renders aggregated summaries either as an aligned terminal table
//! or as indented JSON. Rows are always rendered in the order received; the
//! aggregator owns the sort order.
//!
//! ## Table Output
//!
//! Each table has a header, one line per summary, and a final `TOTAL` line whose
//! figures are the column sums of the rows shown:
//!
//! ```text
//! ╭────────────┬───────┬────────┬──────────────┬────────────┬──────────────┬────────────╮
//! │ Date       ┆ Input ┆ Output ┆ Cache Create ┆ Cache Read ┆ Total Tokens ┆ Cost (USD) │
//! ╞════════════╪═══════╪════════╪══════════════╪════════════╪══════════════╪════════════╡
//! │ 2024-01-01 ┆    13 ┆      7 ┆            0 ┆          0 ┆           20 ┆    $0.0120 │
//! │ TOTAL      ┆    13 ┆      7 ┆            0 ┆          0 ┆           20 ┆    $0.0120 │
//! ╰────────────┴───────┴────────┴──────────────┴────────────┴──────────────┴────────────╯
//! ```
//!
//! Tables are built with `comfy-table`. Numeric columns are right-aligned, the
//! header is bold and the totals row is bold green. Styling is only applied when
//! stdout is a terminal.
//!
//! ## JSON Output
//!
//! The summary list is written with `serde_json::to_writer_pretty`, using the
//! summaries' own field names (`Date`, `InputTokens`, ..., `LastActivity`).

use crate::config::OutputConfig;
use crate::models::*;
use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment,
    Color, Table,
};
use serde::Serialize;
use std::io::{self, Write};

/// Build a table with a bold header. Columns whose index is in `numeric` are
/// right-aligned.
fn new_table(header: &[&str], numeric: std::ops::Range<usize>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(
        header
            .iter()
            .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
    );

    for index in numeric {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

fn total_row(cells: Vec<String>) -> Vec<Cell> {
    cells
        .into_iter()
        .map(|cell| Cell::new(cell).add_attribute(Attribute::Bold).fg(Color::Green))
        .collect()
}

fn render(table: &Table) -> String {
    format!("{}\n", table)
}

fn format_cost(cost: f64) -> String {
    format!("${:.4}", cost)
}

/// Shorten `s` to at most `max_len` characters, marking the cut with `...`
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let mut truncated: String = s.chars().take(max_len - 3).collect();
    truncated.push_str("...");
    truncated
}

#[derive(Debug, Default, Clone, Copy)]
struct ColumnTotals {
    input: u64,
    output: u64,
    cache_create: u64,
    cache_read: u64,
    tokens: u64,
    cost: f64,
}

impl ColumnTotals {
    fn add(&mut self, input: u64, output: u64, cache_create: u64, cache_read: u64, tokens: u64, cost: f64) {
        self.input = self.input.saturating_add(input);
        self.output = self.output.saturating_add(output);
        self.cache_create = self.cache_create.saturating_add(cache_create);
        self.cache_read = self.cache_read.saturating_add(cache_read);
        self.tokens = self.tokens.saturating_add(tokens);
        self.cost += cost;
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.input.to_string(),
            self.output.to_string(),
            self.cache_create.to_string(),
            self.cache_read.to_string(),
            self.tokens.to_string(),
            format_cost(self.cost),
        ]
    }
}

pub struct DisplayManager {
    timestamp_format: String,
    session_width: usize,
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayManager {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default())
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
            session_width: config.session_width,
        }
    }

    pub fn display_daily(&self, data: &[DailySummary], json_output: bool) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if json_output {
            write_json(&mut out, data)
        } else {
            out.write_all(self.render_daily_table(data).as_bytes())
                .context("Failed to write daily report")
        }
    }

    pub fn display_sessions(&self, data: &[SessionSummary], json_output: bool) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        if json_output {
            write_json(&mut out, data)
        } else {
            out.write_all(self.render_session_table(data).as_bytes())
                .context("Failed to write session report")
        }
    }

    pub fn render_daily_table(&self, data: &[DailySummary]) -> String {
        let mut table = new_table(
            &[
                "Date",
                "Input",
                "Output",
                "Cache Create",
                "Cache Read",
                "Total Tokens",
                "Cost (USD)",
            ],
            1..7,
        );
        let mut totals = ColumnTotals::default();

        for day in data {
            table.add_row(vec![
                day.date.clone(),
                day.input_tokens.to_string(),
                day.output_tokens.to_string(),
                day.cache_create_tokens.to_string(),
                day.cache_read_tokens.to_string(),
                day.total_tokens.to_string(),
                format_cost(day.total_cost),
            ]);
            totals.add(
                day.input_tokens,
                day.output_tokens,
                day.cache_create_tokens,
                day.cache_read_tokens,
                day.total_tokens,
                day.total_cost,
            );
        }

        let mut cells = vec!["TOTAL".to_string()];
        cells.extend(totals.cells());
        table.add_row(total_row(cells));
        render(&table)
    }

    pub fn render_session_table(&self, data: &[SessionSummary]) -> String {
        let mut table = new_table(
            &[
                "Project",
                "Session",
                "Input",
                "Output",
                "Cache Create",
                "Cache Read",
                "Total Tokens",
                "Cost (USD)",
                "Last Activity",
            ],
            2..8,
        );
        let mut totals = ColumnTotals::default();

        for session in data {
            table.add_row(vec![
                session.project.clone(),
                truncate_string(&session.session, self.session_width),
                session.input_tokens.to_string(),
                session.output_tokens.to_string(),
                session.cache_create_tokens.to_string(),
                session.cache_read_tokens.to_string(),
                session.total_tokens.to_string(),
                format_cost(session.total_cost),
                session
                    .last_activity
                    .with_timezone(&Local)
                    .format(&self.timestamp_format)
                    .to_string(),
            ]);
            totals.add(
                session.input_tokens,
                session.output_tokens,
                session.cache_create_tokens,
                session.cache_read_tokens,
                session.total_tokens,
                session.total_cost,
            );
        }

        let mut cells = vec!["TOTAL".to_string(), String::new()];
        cells.extend(totals.cells());
        cells.push(String::new());
        table.add_row(total_row(cells));
        render(&table)
    }
}

/// Write `data` as indented JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, data: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, data).context("Failed to encode JSON output")?;
    writeln!(writer).context("Failed to write JSON output")?;
    Ok(())
}
