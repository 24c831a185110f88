//! Shared fixtures for app integration tests.

use std::sync::Arc;

use neuro_sight_app::Dashboard;
use neuro_sight_auth::{InMemorySessionProvider, SessionGate};
use neuro_sight_core::{AnalysisType, MediaFile};
use neuro_sight_sim::ScriptedEventSource;
use neuro_sight_ui::{AppState, UiEvent};

/// Identity used by signed-in fixtures.
#[allow(dead_code)]
pub const ANALYST: &str = "analyst@example.test";

/// Constant 0.99 draws: +2.97 per progress firing, every coin lands false.
/// Progress reaches 100 on firing 34 (t = 27 200 ms) and completes at 28 200 ms.
#[allow(dead_code)]
pub const FAST_COMPLETION_MS: u64 = 28_200;

/// Video fixture.
#[allow(dead_code)]
pub fn video() -> MediaFile {
    MediaFile::new("lobby-cam.mp4", "video/mp4", 10_000)
}

/// Reference image fixture.
#[allow(dead_code)]
pub fn reference_image() -> MediaFile {
    MediaFile::new("suspect.jpg", "image/jpeg", 2_000)
}

/// Dashboard at t = 0 with a signed-in session and constant draws.
#[allow(dead_code)]
pub fn signed_in_dashboard(draw: f64) -> Dashboard<ScriptedEventSource> {
    let provider =
        Arc::new(InMemorySessionProvider::signed_in(ANALYST).expect("fixture identity is valid"));
    Dashboard::new(
        SessionGate::new(provider, true),
        ScriptedEventSource::constant(draw),
        0,
    )
}

/// Walks a dashboard from `home` into `analyzing` for a type without
/// reference image.
#[allow(dead_code)]
pub fn start_analysis(dashboard: &mut Dashboard<ScriptedEventSource>, analysis_type: AnalysisType) {
    dashboard.select_video(video());
    dashboard.dispatch(UiEvent::UploadAndAnalyze);
    let state = dashboard.dispatch(UiEvent::OptionConfirmed(analysis_type));
    assert_eq!(state, AppState::Analyzing, "fixture expects a direct start");
}
