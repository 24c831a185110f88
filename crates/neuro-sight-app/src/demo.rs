//! Headless walk-through of one analysis on a virtual clock.

use std::path::PathBuf;
use std::sync::Arc;

use neuro_sight_auth::{InMemorySessionProvider, SessionGate, SessionProvider};
use neuro_sight_core::MediaFile;
use neuro_sight_sim::{EventSource, MatchStatus, RandomEventSource};
use neuro_sight_ui::{AppState, UiEvent};

use crate::{AppError, Dashboard, DashboardConfig, Route};

/// Video attached by the demo.
pub const DEMO_VIDEO: &str = "demo-footage.mp4";

/// Reference image supplied for face-matching analyses.
pub const DEMO_REFERENCE_IMAGE: &str = "reference-face.png";

/// Virtual clock resolution of the demo loop.
pub const DEMO_STEP_MS: u64 = 250;

const DEMO_VIDEO_BYTES: u64 = 48 * 1024 * 1024;
const DEMO_IMAGE_BYTES: u64 = 256 * 1024;

// Each 800 ms firing adds 1.5 on average; this bounds runs with unlucky draws.
const DEMO_MAX_VIRTUAL_MS: u64 = 30 * 60 * 1_000;

/// What a demo run ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutcome {
    /// Final application mode.
    pub final_state: AppState,
    /// Whether the session gate sent the run to the login view.
    pub redirected_to_login: bool,
    /// Face match result, when a reference image was used.
    pub match_status: MatchStatus,
    /// Number of logged report events.
    pub total_events: usize,
    /// Written report, when the run completed.
    pub report_path: Option<PathBuf>,
    /// Virtual milliseconds elapsed.
    pub elapsed_ms: u64,
}

/// Runs one analysis end-to-end starting at `start_ms` and exports the report.
///
/// # Errors
/// Returns [`AppError`] when the demo session cannot be created, a generator
/// fails or the report cannot be written.
pub fn run_demo(config: &DashboardConfig, start_ms: u64) -> Result<DemoOutcome, AppError> {
    let provider: Arc<dyn SessionProvider> = match config.demo_user.as_deref() {
        Some(user) => Arc::new(InMemorySessionProvider::signed_in(user)?),
        None => Arc::new(InMemorySessionProvider::new()),
    };
    let gate = SessionGate::new(provider, config.require_session);
    let source: Box<dyn EventSource> = match config.seed {
        Some(seed) => Box::new(RandomEventSource::seeded(seed)),
        None => Box::new(RandomEventSource::from_os()),
    };
    let mut dashboard = Dashboard::new(gate, source, start_ms);

    tracing::info!(
        stage = "demo",
        action = "start",
        analysis = %config.analysis_type,
        seeded = config.seed.is_some()
    );

    dashboard.select_video(MediaFile::new(DEMO_VIDEO, "video/mp4", DEMO_VIDEO_BYTES));
    dashboard.dispatch(UiEvent::UploadAndAnalyze);
    if dashboard.route() == Route::Login {
        return Ok(DemoOutcome {
            final_state: dashboard.state(),
            redirected_to_login: true,
            match_status: dashboard.image_match_status(),
            total_events: 0,
            report_path: None,
            elapsed_ms: 0,
        });
    }

    dashboard.dispatch(UiEvent::OptionConfirmed(config.analysis_type));
    let mut match_status = MatchStatus::Idle;
    if dashboard.view().image_upload_open {
        dashboard.dispatch(UiEvent::ReferenceImageSelected(MediaFile::new(
            DEMO_REFERENCE_IMAGE,
            "image/png",
            DEMO_IMAGE_BYTES,
        )));
        while matches!(dashboard.image_match_status(), MatchStatus::Analyzing { .. }) {
            dashboard.advance(dashboard.now_ms() + DEMO_STEP_MS)?;
        }
        match_status = dashboard.image_match_status();
        dashboard.dispatch(UiEvent::ReferenceImageConfirmed);
    }

    let deadline = start_ms.saturating_add(DEMO_MAX_VIRTUAL_MS);
    while dashboard.state() == AppState::Analyzing && dashboard.now_ms() < deadline {
        dashboard.advance(dashboard.now_ms() + DEMO_STEP_MS)?;
    }
    if dashboard.state() == AppState::Analyzing {
        tracing::warn!(stage = "demo", action = "timeout", "terminating unfinished run");
        dashboard.terminate();
    }

    let exported = dashboard.export_report()?;
    let report_path = exported.write_to_dir(&config.export_dir)?;
    let total_events = dashboard.report_entries().len();

    tracing::info!(
        stage = "demo",
        action = "finish",
        total_events,
        path = %report_path.display()
    );

    Ok(DemoOutcome {
        final_state: dashboard.state(),
        redirected_to_login: false,
        match_status,
        total_events,
        report_path: Some(report_path),
        elapsed_ms: dashboard.now_ms().saturating_sub(start_ms),
    })
}
