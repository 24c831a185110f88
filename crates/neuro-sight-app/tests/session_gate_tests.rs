//! Integration tests for gating upload-and-analyze behind a session.

mod common;

use std::sync::Arc;

use neuro_sight_app::{Dashboard, Route};
use neuro_sight_auth::{InMemorySessionProvider, SessionGate, SessionProvider};
use neuro_sight_core::AnalysisType;
use neuro_sight_sim::ScriptedEventSource;
use neuro_sight_ui::{AppState, NotificationLevel, UiEvent};

fn dashboard_over(
    provider: Arc<InMemorySessionProvider>,
    required: bool,
) -> Dashboard<ScriptedEventSource> {
    Dashboard::new(
        SessionGate::new(provider, required),
        ScriptedEventSource::constant(0.5),
        0,
    )
}

#[test]
fn session_gate_tests_redirects_without_session() {
    let provider = Arc::new(InMemorySessionProvider::new());
    let mut dashboard = dashboard_over(provider, true);
    dashboard.select_video(common::video());

    let state = dashboard.dispatch(UiEvent::UploadAndAnalyze);

    assert_eq!(state, AppState::Home);
    assert_eq!(dashboard.route(), Route::Login);
    let notifications = dashboard.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].title, "Authentication required");
}

#[test]
fn session_gate_tests_proceeds_after_sign_in() {
    let provider = Arc::new(InMemorySessionProvider::new());
    let mut dashboard = dashboard_over(provider.clone(), true);
    dashboard.select_video(common::video());
    dashboard.dispatch(UiEvent::UploadAndAnalyze);
    assert_eq!(dashboard.route(), Route::Login);

    provider
        .sign_in(common::ANALYST)
        .expect("sign in should succeed");
    dashboard.return_from_login();
    assert_eq!(dashboard.route(), Route::Dashboard);
    assert_eq!(dashboard.view().identity.as_deref(), Some(common::ANALYST));

    assert_eq!(dashboard.dispatch(UiEvent::UploadAndAnalyze), AppState::Options);
}

#[test]
fn session_gate_tests_ungated_dashboard_skips_check() {
    let provider = Arc::new(InMemorySessionProvider::new());
    let mut dashboard = dashboard_over(provider, false);
    dashboard.select_video(common::video());

    assert_eq!(dashboard.dispatch(UiEvent::UploadAndAnalyze), AppState::Options);
    assert_eq!(dashboard.route(), Route::Dashboard);
}

#[test]
fn session_gate_tests_sign_out_blocks_next_upload() {
    let provider = Arc::new(
        InMemorySessionProvider::signed_in(common::ANALYST).expect("fixture identity is valid"),
    );
    let mut dashboard = dashboard_over(provider, true);
    dashboard.select_video(common::video());

    assert!(dashboard.sign_out());
    assert_eq!(dashboard.view().identity, None);
    assert_eq!(dashboard.dispatch(UiEvent::UploadAndAnalyze), AppState::Home);
    assert_eq!(dashboard.route(), Route::Login);
}

#[test]
fn session_gate_tests_sign_out_failure_notifies() {
    let provider = Arc::new(
        InMemorySessionProvider::signed_in(common::ANALYST)
            .expect("fixture identity is valid")
            .with_failing_sign_out(),
    );
    let mut dashboard = dashboard_over(provider, true);

    assert!(!dashboard.sign_out());
    let notifications = dashboard.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].level, NotificationLevel::Error);
    assert_eq!(notifications[0].title, "Sign out failed");
    assert_eq!(dashboard.view().identity.as_deref(), Some(common::ANALYST));
    assert!(dashboard.notifications().is_empty());
}

#[test]
fn session_gate_tests_upload_outside_home_skips_lookup() {
    let provider = Arc::new(
        InMemorySessionProvider::signed_in(common::ANALYST).expect("fixture identity is valid"),
    );
    let mut dashboard = dashboard_over(provider.clone(), true);
    dashboard.select_video(common::video());
    dashboard.dispatch(UiEvent::UploadAndAnalyze);
    dashboard.dispatch(UiEvent::OptionConfirmed(AnalysisType::ObjectDetection));
    assert_eq!(dashboard.state(), AppState::Analyzing);

    provider.sign_out().expect("sign out should succeed");
    assert_eq!(dashboard.dispatch(UiEvent::UploadAndAnalyze), AppState::Analyzing);

    assert_eq!(dashboard.view().identity.as_deref(), Some(common::ANALYST));
    assert_eq!(dashboard.route(), Route::Dashboard);
    assert!(dashboard.notifications().is_empty());
}
