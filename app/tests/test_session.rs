//! FILENAME: tests/test_session.rs
//! End-to-end tests of the JSON-lines session: load, replay input, read frames.

mod common;

use std::path::PathBuf;

use common::SalesFixture;
use crossfilter::{Emphasis, TimeMode};
use dashboard_lib::{run, run_session, DashboardConfig, DashboardFrame, SessionSummary};

fn frames(output: &[u8]) -> Vec<DashboardFrame> {
    std::str::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_session_replays_commands_and_clicks() {
    let dataset = SalesFixture::dataset();
    let input = r#"
# select a segment from the scatter, then a year
{"view":"scatter","value":"Consumer"}
{"type":"setYear","year":{"year":2016}}
{"view":"bar"}
{"type":"reset"}
"#;
    let mut output = Vec::new();
    let summary = run_session(&dataset, &DashboardConfig::default(), input.as_bytes(), &mut output).unwrap();

    assert_eq!(
        summary,
        SessionSummary { commands_applied: 3, commands_rejected: 0, frames: 4 }
    );

    let frames = frames(&output);
    assert_eq!(frames.len(), 4);

    let consumer = &frames[1];
    assert_eq!(consumer.pie.title, "Consumer Revenue");
    for point in &consumer.scatter.points {
        let expected = if point.segment == "Consumer" { Emphasis::Full } else { Emphasis::Reduced };
        assert_eq!(point.emphasis, expected);
    }
    // Consumer orders: CA-1, US-3, CA-4
    assert_eq!(consumer.kpis.order_count, 3);

    let year = &frames[2];
    assert_eq!(year.profit_timeline.mode, TimeMode::Month);
    assert_eq!(year.kpis.order_count, 1);

    assert!(!frames[3].show_reset);
    assert_eq!(frames[3].kpis, frames[0].kpis);
}

#[test]
fn test_session_rejects_malformed_lines() {
    let dataset = SalesFixture::dataset();
    let input = "not json\n{\"type\":\"explode\"}\n{\"type\":\"clearRegion\"}\n";
    let mut output = Vec::new();
    let summary = run_session(&dataset, &DashboardConfig::default(), input.as_bytes(), &mut output).unwrap();

    assert_eq!(summary.commands_rejected, 2);
    assert_eq!(summary.commands_applied, 1);
    assert_eq!(frames(&output).len(), 2);
}

#[test]
fn test_session_survives_undecodable_line() {
    let dataset = SalesFixture::dataset();
    let mut input = b"{\"view\":\"pie\",\"value\":\"Technology\"}\n".to_vec();
    input.extend_from_slice(b"\xff\xfe\n");
    input.extend_from_slice(b"{\"type\":\"reset\"}\n");

    let mut output = Vec::new();
    let summary = run_session(&dataset, &DashboardConfig::default(), input.as_slice(), &mut output).unwrap();

    assert_eq!(
        summary,
        SessionSummary { commands_applied: 2, commands_rejected: 1, frames: 3 }
    );
    let frames = frames(&output);
    assert_eq!(frames.len(), 3);
    assert!(!frames[2].show_reset);
}

#[test]
fn test_session_over_empty_dataset() {
    let dataset = dataset::Dataset::default();
    let mut output = Vec::new();
    let summary = run_session(
        &dataset,
        &DashboardConfig::default(),
        "{\"view\":\"pie\",\"value\":\"Technology\"}\n".as_bytes(),
        &mut output,
    )
    .unwrap();

    assert_eq!(summary.frames, 2);
    let last = frames(&output).pop().unwrap();
    assert_eq!(last.kpis.order_count, 0);
    assert_eq!(last.kpi_display.margin, "0.00%");
    assert!(last.year_options.is_empty());
    assert!(last.revenue_timeline.buckets.is_empty());
}

#[test]
fn test_run_loads_csv_and_applies_config() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("sales.csv");
    std::fs::write(&data_path, SalesFixture::csv()).unwrap();

    let config = DashboardConfig {
        data_path: PathBuf::from(&data_path),
        top_products: 3,
        ..DashboardConfig::default()
    };

    let mut output = Vec::new();
    let summary = run(&config, "".as_bytes(), &mut output).unwrap();
    assert_eq!(summary.frames, 1);

    let frame = &frames(&output)[0];
    assert_eq!(frame.kpis.order_count, 8);
    assert_eq!(frame.bar.products.len(), 3);
    assert_eq!(frame.year_options, vec![2014, 2015, 2016, 2017]);
}

#[test]
fn test_run_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig {
        data_path: dir.path().join("absent.csv"),
        ..DashboardConfig::default()
    };
    let mut output = Vec::new();
    assert!(run(&config, "".as_bytes(), &mut output).is_err());
    assert!(output.is_empty());
}
