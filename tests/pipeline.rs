//! End-to-end tests from exported session documents to the dashboard report

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use scholar_focus::encoder::ReportEncoder;
use scholar_focus::types::FocusReport;
use scholar_focus::{FocusConfig, FocusProcessor, SessionAdapter};

// Friday 2024-03-15 18:00 UTC
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
}

fn processor() -> FocusProcessor {
    let config = FocusConfig::default()
        .with_target_hours(2.0)
        .with_utc_offset("Z");
    FocusProcessor::new(config)
        .unwrap()
        .with_encoder(ReportEncoder::with_instance_id("e2e".to_string()))
}

const EXPORT: &str = r#"[
    {"id": "fri-1", "startTime": "2024-03-15T08:00:00Z", "actualDurationMinutes": 50,
     "plannedDurationMinutes": 50, "status": "Completed", "interruptionCount": 0, "strictModeUsed": true},
    {"id": "fri-2", "startTime": {"_seconds": 1710500400, "_nanoseconds": 0}, "actualDurationMinutes": "25",
     "plannedDurationMinutes": 25, "status": "completed"},
    {"id": "fri-3", "startTime": "2024-03-15T14:00:00Z", "actualDurationMinutes": 10,
     "plannedDurationMinutes": 25, "status": "Abandoned", "interruptionCount": 3},
    {"id": "mon-prev", "startTime": 1709550000000, "actualDurationMinutes": 90,
     "plannedDurationMinutes": 90, "status": "Completed"},
    {"id": "undated", "actualDurationMinutes": 40, "status": "Completed"},
    {"id": "broken", "startTime": "yesterday", "actualDurationMinutes": -5, "status": "Paused"}
]"#;

#[test]
fn test_report_from_json_export() {
    let raw = SessionAdapter::parse_array(EXPORT).unwrap();
    let report: FocusReport = processor().process_sessions(&raw, now());

    // 50 + 25 completed today; abandoned session does not count
    assert_eq!(report.daily_goal.completed_minutes_today, 75);
    assert_eq!(report.daily_goal.target_hours, 2.0);
    // 1.25h of 2h = 62.5% -> 63
    assert_eq!(report.daily_goal.percent_complete, 63);

    // Friday is index 5; the previous Monday (2024-03-04) is index 1
    assert_eq!(report.weekly_trend.points[5].current_week_minutes, 75);
    assert_eq!(report.weekly_trend.points[1].previous_week_minutes, 90);
    assert_eq!(report.weekly_trend.current_week_total, 75);
    assert_eq!(report.weekly_trend.previous_week_total, 90);

    // Lifetime includes the undated session: 50 + 25 + 90 + 40 = 205 minutes
    assert_eq!(report.lifetime.total_sessions, 6);
    assert_eq!(report.lifetime.completed_sessions, 4);
    assert_eq!(report.lifetime.completed_minutes, 205);
    assert_eq!(report.lifetime.abandoned_sessions, 1);
    assert_eq!(report.lifetime.unknown_status_sessions, 1);
    assert_eq!(report.level.level, 1);
    assert_eq!(report.level.title, "Novice Scholar");

    assert_eq!(report.normalization.records, 6);
    assert_eq!(report.normalization.defaulted_records, 2);
    assert_eq!(
        report.normalization.flags,
        vec![
            "invalid_duration".to_string(),
            "invalid_start_time".to_string(),
            "missing_start_time".to_string(),
            "unknown_status".to_string(),
        ]
    );
    assert_eq!(report.producer.instance_id, "e2e");
}

#[test]
fn test_ndjson_and_json_inputs_agree() {
    let raw = SessionAdapter::parse_array(EXPORT).unwrap();
    let ndjson: String = raw
        .iter()
        .map(|r| serde_json::to_string(r).unwrap() + "\n")
        .collect();

    let from_json = processor().process_json(EXPORT, now()).unwrap();
    let from_ndjson = processor().process_ndjson(&ndjson, now()).unwrap();

    let mut a: serde_json::Value = serde_json::from_str(&from_json).unwrap();
    let mut b: serde_json::Value = serde_json::from_str(&from_ndjson).unwrap();
    // computedAtUtc is wall-clock time
    a["provenance"]["computedAtUtc"] = serde_json::Value::Null;
    b["provenance"]["computedAtUtc"] = serde_json::Value::Null;
    assert_eq!(a, b);
}

#[test]
fn test_validation_lists_defaulted_records() {
    let raw = SessionAdapter::parse_array(EXPORT).unwrap();
    let results = SessionAdapter::validate_sessions(&raw);

    let ids: Vec<Option<String>> = results.iter().map(|r| r.session_id.clone()).collect();
    assert_eq!(
        ids,
        vec![Some("undated".to_string()), Some("broken".to_string())]
    );
    assert_eq!(results[0].index, 4);
    assert!(results[1].describe().contains("startTime"));
}

#[test]
fn test_level_five_after_a_hundred_hours() {
    let docs: Vec<String> = (0..50)
        .map(|i| {
            format!(
                r#"{{"id": "s{i}", "startTime": "2023-06-01T09:00:00Z", "actualDurationMinutes": 120, "status": "Completed"}}"#
            )
        })
        .collect();
    let json = format!("[{}]", docs.join(","));

    let report: serde_json::Value =
        serde_json::from_str(&processor().process_json(&json, now()).unwrap()).unwrap();
    assert_eq!(report["level"]["level"], 5);
    assert_eq!(report["level"]["title"], "Master Scholar");
    assert!(report["level"]["hoursToNextLevel"].is_null());
}
