//! Integration tests for exporting the analysis log.

mod common;

use neuro_sight_app::AppError;
use neuro_sight_core::AnalysisType;
use neuro_sight_report::ReportError;

#[test]
fn report_export_tests_total_matches_log_length() {
    let mut dashboard = common::signed_in_dashboard(0.99);
    common::start_analysis(&mut dashboard, AnalysisType::ObjectDetection);
    dashboard.advance(10_000).expect("advance should not fail");

    assert_eq!(dashboard.report_entries().len(), 6);
    let exported = dashboard.export_report().expect("export should succeed");

    assert_eq!(exported.file_name, "neuro-sight-report-10000.txt");
    assert_eq!(exported.mime_type, "text/plain");
    let body = &exported.body;
    assert!(body.contains("Analysis Type: Object Detection Analysis\n"));
    assert!(body.contains("Duration: 10 seconds\n"));
    assert!(body.contains("6 total events detected\n"));
    assert!(body.contains("1 medium priority alerts\n"));
    assert!(body.contains("5 low priority events\n"));
    assert!(body.contains("[00:00:10] MULTIPLE VEHICLES IN FRAME: TRAFFIC PATTERN ANALYSIS\n"));
    assert!(body.ends_with("- Update security protocols based on findings\n"));
}

#[test]
fn report_export_tests_refuses_empty_log() {
    let dashboard = common::signed_in_dashboard(0.5);
    assert!(matches!(
        dashboard.export_report(),
        Err(AppError::Report(ReportError::EmptyLog))
    ));
}

#[test]
fn report_export_tests_writes_file_to_directory() {
    let mut dashboard = common::signed_in_dashboard(0.99);
    common::start_analysis(&mut dashboard, AnalysisType::SuspiciousActivity);
    dashboard.advance(4_000).expect("advance should not fail");
    dashboard.terminate();

    let dir = std::env::temp_dir().join(format!("neuro-sight-export-{}", std::process::id()));
    let exported = dashboard.export_report().expect("export should succeed");
    let path = exported
        .write_to_dir(&dir)
        .expect("export should be written");

    let written = std::fs::read_to_string(&path).expect("export should be readable");
    assert_eq!(written, exported.body);
    assert!(written.contains("3 total events detected"));

    std::fs::remove_dir_all(&dir).expect("temp dir should be removable");
}

#[test]
fn report_export_tests_snapshot_serializes_same_totals() {
    let mut dashboard = common::signed_in_dashboard(0.99);
    common::start_analysis(&mut dashboard, AnalysisType::SuspiciousActivity);
    dashboard.advance(6_000).expect("advance should not fail");

    let snapshot = dashboard
        .report_document()
        .expect("document should build")
        .snapshot();
    let raw = snapshot.to_json_bytes().expect("snapshot should encode");
    let value: serde_json::Value = serde_json::from_slice(&raw).expect("snapshot is JSON");

    assert_eq!(value["schema_version"], "v1");
    assert_eq!(value["analysis_type"], "suspicious-activity");
    assert_eq!(value["total_events"], 4);
    assert_eq!(
        value["entries"].as_array().map(Vec::len),
        Some(dashboard.report_entries().len())
    );
}
