#![warn(missing_docs)]
//! # neuro-sight-app
//!
//! ## Purpose
//! Runs the NeuroSight dashboard: view state, session gate, simulated
//! generators and report export wired together on one clock.
//!
//! ## Responsibilities
//! - Dispatch UI events through the view controller and carry out the
//!   returned effects (notifications, login redirects, mounting generators).
//! - Drive every mounted generator from `advance(now_ms)` in timestamp order
//!   so callbacks fire exactly as their intervals would.
//! - Apply completion and termination callbacks and export the report.
//! - Load configuration from the environment and expose the build version.
//!
//! ## Data flow
//! User action -> [`Dashboard::dispatch`] -> controller effects -> generator
//! mount/unmount. Clock tick -> [`Dashboard::advance`] -> generator firings ->
//! completion callback -> controller. Export -> [`Dashboard::export_report`].
//!
//! ## Ownership and lifetimes
//! The dashboard owns the controller, the generators and the event source.
//! The session provider is shared through the gate so callers can flip the
//! session from outside.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`]. User-facing failures are
//! notifications, not errors.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use neuro_sight_app::Dashboard;
//! use neuro_sight_auth::{InMemorySessionProvider, SessionGate};
//! use neuro_sight_core::{AnalysisType, MediaFile};
//! use neuro_sight_sim::ScriptedEventSource;
//! use neuro_sight_ui::{AppState, UiEvent};
//!
//! let provider = Arc::new(InMemorySessionProvider::signed_in("a@b.c").expect("valid identity"));
//! let gate = SessionGate::new(provider, true);
//! let mut dashboard = Dashboard::new(gate, ScriptedEventSource::constant(0.5), 0);
//!
//! dashboard.dispatch(UiEvent::VideoSelected(MediaFile::new("cam.mp4", "video/mp4", 1)));
//! dashboard.dispatch(UiEvent::UploadAndAnalyze);
//! dashboard.dispatch(UiEvent::OptionConfirmed(AnalysisType::ObjectDetection));
//! assert_eq!(dashboard.state(), AppState::Analyzing);
//! ```

mod config;
mod demo;

use neuro_sight_auth::{AuthError, GateDecision, SessionGate};
use neuro_sight_core::{AnalysisType, MediaFile, ReportEntry};
use neuro_sight_report::{ExportedReport, ReportDocument, ReportError};
use neuro_sight_sim::{
    EventSource, HeatMapGenerator, ImageMatchSimulator, MatchStatus, ProgressGenerator,
    ProgressSignal, ProgressSnapshot, ProgressStatus, ReportGenerator, SimError,
};
use neuro_sight_ui::{
    AppState, Notification, NotificationLevel, UiEffect, UiEvent, ViewController, ViewSnapshot,
};
use thiserror::Error;

pub use config::{
    ConfigError, DEFAULT_DEMO_USER, DashboardConfig, ENV_ANALYSIS, ENV_DEMO_USER, ENV_EXPORT_DIR,
    ENV_REQUIRE_SESSION, ENV_SEED, flag_enabled,
};
pub use demo::{DemoOutcome, DEMO_REFERENCE_IMAGE, DEMO_STEP_MS, DEMO_VIDEO, run_demo};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("NEURO_SIGHT_VERSION");

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Top-level view the shell should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The dashboard itself.
    Dashboard,
    /// Login view at [`neuro_sight_auth::LOGIN_ROUTE`].
    Login,
}

/// Dashboard runtime over an event source `S`.
pub struct Dashboard<S> {
    controller: ViewController,
    gate: SessionGate,
    source: S,
    heat_map: HeatMapGenerator,
    progress: Option<ProgressGenerator>,
    report: Option<ReportGenerator>,
    image_match: ImageMatchSimulator,
    notifications: Vec<Notification>,
    route: Route,
    completions: u32,
    now_ms: u64,
}

impl<S: EventSource> Dashboard<S> {
    /// Mounts the dashboard at `home` and records the current session.
    pub fn new(mut gate: SessionGate, source: S, now_ms: u64) -> Self {
        let mut controller = ViewController::new(gate.is_required());
        gate.refresh();
        controller.set_session(gate.identity().map(str::to_string));

        tracing::info!(
            stage = "dashboard",
            action = "mount",
            session_required = gate.is_required(),
            signed_in = gate.identity().is_some()
        );

        Self {
            controller,
            gate,
            source,
            heat_map: HeatMapGenerator::new(now_ms),
            progress: None,
            report: None,
            image_match: ImageMatchSimulator::new(),
            notifications: Vec::new(),
            route: Route::Dashboard,
            completions: 0,
            now_ms,
        }
    }

    /// Current dashboard clock.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Current application mode.
    pub fn state(&self) -> AppState {
        self.controller.state()
    }

    /// Render snapshot of the view state.
    pub fn view(&self) -> ViewSnapshot {
        self.controller.snapshot()
    }

    /// Route the shell should display.
    pub fn route(&self) -> Route {
        self.route
    }

    /// Returns from the login view to the dashboard.
    pub fn return_from_login(&mut self) {
        self.route = Route::Dashboard;
        self.gate.refresh();
        self.controller
            .set_session(self.gate.identity().map(str::to_string));
    }

    /// Applies one UI event at the current clock.
    pub fn dispatch(&mut self, event: UiEvent) -> AppState {
        if event == UiEvent::UploadAndAnalyze && self.controller.state() == AppState::Home {
            let identity = match self.gate.check() {
                GateDecision::Proceed { identity } => identity,
                GateDecision::RedirectToLogin => None,
            };
            self.controller.set_session(identity);
        }

        let before = self.controller.state();
        let effects = self.controller.handle(event);
        let after = self.controller.state();
        if before != after {
            tracing::info!(stage = "ui", action = "transition", from = ?before, to = ?after);
        }

        for effect in effects {
            self.apply(effect);
        }
        after
    }

    /// Attaches a video; wrong MIME types are ignored.
    pub fn select_video(&mut self, file: MediaFile) -> bool {
        self.dispatch(UiEvent::VideoSelected(file));
        self.controller.uploads().has_video()
    }

    fn apply(&mut self, effect: UiEffect) {
        let now_ms = self.now_ms;
        match effect {
            UiEffect::Notify(notification) => {
                match notification.level {
                    NotificationLevel::Error => tracing::warn!(
                        stage = "ui",
                        action = "notify",
                        title = %notification.title
                    ),
                    NotificationLevel::Info => tracing::info!(
                        stage = "ui",
                        action = "notify",
                        title = %notification.title
                    ),
                }
                self.notifications.push(notification);
            }
            UiEffect::RedirectToLogin => {
                tracing::info!(
                    stage = "auth",
                    action = "redirect",
                    route = neuro_sight_auth::LOGIN_ROUTE
                );
                self.route = Route::Login;
            }
            UiEffect::StartImageMatch(analysis_type) => {
                if self.image_match.on_image_selected(analysis_type, now_ms) {
                    tracing::info!(stage = "image_match", action = "start", %analysis_type);
                }
            }
            UiEffect::CancelImageMatch => {
                if self.image_match.status() != MatchStatus::Idle {
                    tracing::info!(stage = "image_match", action = "cancel");
                }
                self.image_match.reset();
            }
            UiEffect::StartAnalysis {
                analysis_type,
                fresh_log,
            } => self.start_analysis(analysis_type, fresh_log),
            UiEffect::StopAnalysis => {
                self.progress = None;
                if let Some(report) = self.report.as_mut() {
                    report.set_active(false, now_ms);
                }
                self.heat_map.set_active(false, now_ms);
                tracing::info!(stage = "analysis", action = "stop");
            }
            UiEffect::ReturnHome => {
                self.progress = None;
                self.report = None;
                self.heat_map.set_active(false, now_ms);
                self.image_match.reset();
                tracing::info!(stage = "analysis", action = "unmount");
            }
        }
    }

    fn start_analysis(&mut self, analysis_type: AnalysisType, fresh_log: bool) {
        let now_ms = self.now_ms;
        self.progress = Some(ProgressGenerator::mount(analysis_type, now_ms));
        match self.report.as_mut() {
            Some(report) if !fresh_log => report.set_active(true, now_ms),
            _ => self.report = Some(ReportGenerator::mount(analysis_type, now_ms, true)),
        }
        self.heat_map.set_active(true, now_ms);
        self.image_match.reset();
        tracing::info!(stage = "analysis", action = "start", %analysis_type, fresh_log);
    }

    /// Moves the clock to `now_ms`, firing every due timer in time order.
    ///
    /// Timers due at the same instant fire in the order progress, report,
    /// heat map, image match. A completion callback tears the run down before
    /// any later firing is considered.
    ///
    /// # Errors
    /// Returns [`AppError::Sim`] when a generated heat-map point is invalid.
    pub fn advance(&mut self, now_ms: u64) -> Result<(), AppError> {
        while let Some(due) = self.next_deadline_ms().filter(|due| *due <= now_ms) {
            self.now_ms = self.now_ms.max(due);
            self.fire_due(due)?;
        }
        self.now_ms = self.now_ms.max(now_ms);
        Ok(())
    }

    fn next_deadline_ms(&self) -> Option<u64> {
        [
            self.progress.as_ref().and_then(ProgressGenerator::next_deadline_ms),
            self.report.as_ref().and_then(ReportGenerator::next_due_ms),
            self.heat_map.next_due_ms(),
            self.image_match.next_deadline_ms(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn fire_due(&mut self, due: u64) -> Result<(), AppError> {
        let source: &mut dyn EventSource = &mut self.source;

        let signal = match self.progress.as_mut() {
            Some(progress) => progress.advance(due, source),
            None => None,
        };
        if signal == Some(ProgressSignal::Completed) {
            self.completions += 1;
            tracing::info!(stage = "analysis", action = "complete", at_ms = due);
            self.dispatch(UiEvent::ProgressCompleted);
        }

        let source: &mut dyn EventSource = &mut self.source;
        if let Some(report) = self.report.as_mut() {
            let appended = report.advance(due, source);
            if appended > 0 {
                tracing::debug!(stage = "report", action = "append", appended);
            }
        }

        let added = self.heat_map.advance(due, source)?;
        if added > 0 {
            tracing::debug!(stage = "heat_map", action = "point", added);
        }

        if let Some(outcome) = self.image_match.advance(due, source) {
            tracing::info!(stage = "image_match", action = "resolved", ?outcome);
        }
        Ok(())
    }

    /// Pause/resume button. Returns the new status while analyzing.
    pub fn toggle_pause(&mut self) -> Option<ProgressStatus> {
        let now_ms = self.now_ms;
        let status = self.progress.as_mut()?.toggle_pause(now_ms);
        tracing::info!(stage = "analysis", action = "toggle_pause", ?status);
        Some(status)
    }

    /// "Terminate & Generate Report": stops the run and moves to `completed`.
    pub fn terminate(&mut self) -> AppState {
        let signal = self.progress.as_mut().and_then(ProgressGenerator::terminate);
        if signal == Some(ProgressSignal::Terminated) {
            tracing::info!(stage = "analysis", action = "terminate", at_ms = self.now_ms);
            return self.dispatch(UiEvent::Terminate);
        }
        self.controller.state()
    }

    /// Progress panel snapshot while analyzing.
    pub fn progress(&self) -> Option<ProgressSnapshot> {
        self.progress.as_ref().map(ProgressGenerator::snapshot)
    }

    /// Report log; empty when no log is mounted.
    pub fn report_entries(&self) -> &[ReportEntry] {
        self.report
            .as_ref()
            .map(ReportGenerator::entries)
            .unwrap_or(&[])
    }

    /// Heat-map generator.
    pub fn heat_map(&self) -> &HeatMapGenerator {
        &self.heat_map
    }

    /// State of the simulated face match.
    pub fn image_match_status(&self) -> MatchStatus {
        self.image_match.status()
    }

    /// Number of completion callbacks delivered so far.
    pub fn completions(&self) -> u32 {
        self.completions
    }

    /// Notifications raised so far.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Takes and clears pending notifications.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Builds the report document from the current log.
    ///
    /// # Errors
    /// Returns [`AppError::Report`] with [`ReportError::EmptyLog`] when no log
    /// is mounted.
    pub fn report_document(&self) -> Result<ReportDocument, AppError> {
        let Some(report) = self.report.as_ref() else {
            return Err(AppError::Report(ReportError::EmptyLog));
        };
        let document = ReportDocument::new(
            report.analysis_type(),
            report.mounted_at_ms(),
            self.now_ms,
            report.entries(),
        )?;
        Ok(document)
    }

    /// Exports the current log as a text document.
    ///
    /// # Errors
    /// See [`Dashboard::report_document`].
    pub fn export_report(&self) -> Result<ExportedReport, AppError> {
        let exported = self.report_document()?.export();
        tracing::info!(
            stage = "report",
            action = "export",
            file = %exported.file_name,
            events = self.report_entries().len()
        );
        Ok(exported)
    }

    /// Signs out through the provider. Failure becomes an error notification.
    pub fn sign_out(&mut self) -> bool {
        match self.gate.sign_out() {
            Ok(()) => {
                self.controller.set_session(None);
                self.apply(UiEffect::Notify(Notification::info(
                    "Signed out",
                    "You have been signed out.",
                )));
                true
            }
            Err(error) => {
                tracing::warn!(stage = "auth", action = "sign_out", %error);
                self.apply(UiEffect::Notify(Notification::error(
                    "Sign out failed",
                    error.to_string(),
                )));
                false
            }
        }
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Auth subsystem error.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Simulation error.
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),
    /// Report export error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}
