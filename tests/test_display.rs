use ccstats::display::{write_json, DisplayManager};
use ccstats::models::{DailySummary, SessionSummary};
use ccstats::timestamp_parser::TimestampParser;

fn daily(date: &str, input: u64, output: u64, cost: f64) -> DailySummary {
    DailySummary {
        date: date.to_string(),
        input_tokens: input,
        output_tokens: output,
        cache_create_tokens: 0,
        cache_read_tokens: 0,
        total_tokens: input + output,
        total_cost: cost,
    }
}

fn session(project: &str, session: &str, last: &str) -> SessionSummary {
    SessionSummary {
        project: project.to_string(),
        session: session.to_string(),
        input_tokens: 100,
        output_tokens: 50,
        cache_create_tokens: 10,
        cache_read_tokens: 5,
        total_tokens: 165,
        total_cost: 0.15,
        last_activity: TimestampParser::parse(last).unwrap(),
    }
}

#[test]
fn test_daily_table_has_totals_row() {
    let display_manager = DisplayManager::new();
    let rendered = display_manager.render_daily_table(&[
        daily("2024-01-01", 13, 7, 0.012),
        daily("2024-01-02", 100, 50, 1.5),
    ]);
    let lines: Vec<&str> = rendered.lines().collect();

    let header = lines.iter().position(|l| l.contains("Date")).unwrap();
    let first = lines.iter().position(|l| l.contains("2024-01-01")).unwrap();
    let second = lines.iter().position(|l| l.contains("2024-01-02")).unwrap();
    let total = lines.iter().position(|l| l.contains("TOTAL")).unwrap();
    assert!(header < first && first < second && second < total);
    assert!(lines[header].contains("Cost (USD)"));

    let total_line = lines[total];
    assert!(total_line.contains("113"));
    assert!(total_line.contains("57"));
    assert!(total_line.contains("170"));
    assert!(total_line.contains("$1.5120"));
}

#[test]
fn test_session_table_truncates_long_sessions() {
    let display_manager = DisplayManager::new();
    let rendered = display_manager.render_session_table(&[
        session("web", "0123456789abcdefghijklmnop", "2024-01-02T10:00:00Z"),
        session("api", "short", "2024-01-01T10:00:00Z"),
    ]);

    assert!(rendered.contains("0123456789abcdefg..."));
    assert!(!rendered.contains("0123456789abcdefghij"));
    let total_line = rendered.lines().find(|l| l.contains("TOTAL")).unwrap();
    assert!(total_line.contains("$0.3000"));
    let web = rendered.lines().position(|l| l.contains("web")).unwrap();
    let api = rendered.lines().position(|l| l.contains("api")).unwrap();
    assert!(web < api);
}

#[test]
fn test_totals_row_saturates() {
    let mut big = daily("2024-01-01", u64::MAX, 0, 0.0);
    big.total_tokens = u64::MAX;
    let rendered = DisplayManager::new().render_daily_table(&[big.clone(), big]);

    let total_line = rendered.lines().find(|l| l.contains("TOTAL")).unwrap();
    assert!(total_line.contains(&u64::MAX.to_string()));
}

#[test]
fn test_json_preserves_order_and_field_names() -> anyhow::Result<()> {
    let rows = vec![daily("2024-01-02", 1, 1, 0.0), daily("2024-01-01", 2, 2, 0.0)];
    let mut out = Vec::new();
    write_json(&mut out, &rows)?;

    let text = String::from_utf8(out)?;
    assert!(text.contains("\n  {\n    \"Date\""));

    let parsed: serde_json::Value = serde_json::from_str(&text)?;
    let dates: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["Date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-01-02", "2024-01-01"]);
    assert_eq!(parsed[0]["TotalTokens"], 2);
    Ok(())
}

#[test]
fn test_session_json_fields() -> anyhow::Result<()> {
    let rows = vec![session("web", "s1", "2024-01-02T10:00:00Z")];
    let mut out = Vec::new();
    write_json(&mut out, &rows)?;

    let parsed: serde_json::Value = serde_json::from_slice(&out)?;
    let row = &parsed[0];
    for field in [
        "Project",
        "Session",
        "InputTokens",
        "OutputTokens",
        "CacheCreateTokens",
        "CacheReadTokens",
        "TotalTokens",
        "TotalCost",
        "LastActivity",
    ] {
        assert!(row.get(field).is_some(), "missing {}", field);
    }
    assert_eq!(row["LastActivity"], "2024-01-02T10:00:00Z");
    Ok(())
}
