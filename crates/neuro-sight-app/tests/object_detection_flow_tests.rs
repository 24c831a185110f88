//! Integration tests for analysis types that start without a reference image.

mod common;

use neuro_sight_core::AnalysisType;
use neuro_sight_sim::ProgressStatus;
use neuro_sight_ui::{AppState, UiEvent};

#[test]
fn object_detection_flow_tests_goes_straight_to_analyzing() {
    for analysis_type in [AnalysisType::ObjectDetection, AnalysisType::SuspiciousActivity] {
        let mut dashboard = common::signed_in_dashboard(0.5);
        dashboard.select_video(common::video());
        assert_eq!(dashboard.dispatch(UiEvent::UploadAndAnalyze), AppState::Options);

        let state = dashboard.dispatch(UiEvent::OptionConfirmed(analysis_type));
        assert_eq!(state, AppState::Analyzing);
        assert!(!dashboard.view().image_upload_open);

        let progress = dashboard.progress().expect("progress mounted");
        assert_eq!(progress.progress, 0.0);
        assert_eq!(progress.status, ProgressStatus::Running);
        assert_eq!(progress.analysis_type, analysis_type);
        assert_eq!(dashboard.report_entries().len(), 1);
        assert!(dashboard.heat_map().is_active());
    }
}

#[test]
fn object_detection_flow_tests_missing_video_stays_home() {
    let mut dashboard = common::signed_in_dashboard(0.5);
    let state = dashboard.dispatch(UiEvent::UploadAndAnalyze);

    assert_eq!(state, AppState::Home);
    let notifications = dashboard.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "No video uploaded");
}

#[test]
fn object_detection_flow_tests_cancel_returns_home_with_video() {
    let mut dashboard = common::signed_in_dashboard(0.5);
    dashboard.select_video(common::video());
    dashboard.dispatch(UiEvent::UploadAndAnalyze);

    let state = dashboard.dispatch(UiEvent::OptionsCancelled);
    assert_eq!(state, AppState::Home);
    assert_eq!(dashboard.view().video_name.as_deref(), Some("lobby-cam.mp4"));
}
