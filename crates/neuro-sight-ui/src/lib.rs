#![warn(missing_docs)]
//! # neuro-sight-ui
//!
//! ## Purpose
//! Owns the dashboard's view state machine.
//!
//! ## Responsibilities
//! - Hold the current [`AppState`], analysis selection, uploaded files and the
//!   image-upload modal.
//! - Apply user and timer events as explicit transitions that return
//!   [`UiEffect`] values for the runtime to carry out.
//! - Expose immutable [`ViewSnapshot`] values for rendering.
//!
//! ## Data flow
//! Runtime dispatches [`UiEvent`] -> [`ViewController::handle`] mutates state
//! and returns effects -> runtime mounts/unmounts generators and shows
//! notifications.
//!
//! ## Ownership and lifetimes
//! The controller owns all UI state. Snapshots are clones, so renderers never
//! borrow from the controller across events.
//!
//! ## Error model
//! There are no error states. Events that do not apply to the current state
//! are ignored and yield no effects.

use neuro_sight_core::{AnalysisType, MediaFile, UploadedFiles};

/// Application mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Landing view with the upload button.
    Home,
    /// Analysis type picker.
    Options,
    /// Simulated analysis running.
    Analyzing,
    /// Analysis stopped; report still visible.
    Completed,
}

/// Session projection used by the upload gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAuthState {
    /// Provider not consulted yet.
    Unknown,
    /// No session.
    SignedOut,
    /// Valid session.
    SignedIn,
}

/// Severity of a transient toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Informational.
    Info,
    /// Something the user has to fix.
    Error,
}

/// Transient toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Toast level.
    pub level: NotificationLevel,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notification {
    /// Error-level toast.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Info-level toast.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Input to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// File picked in the video input.
    VideoSelected(MediaFile),
    /// "Upload & Analyze" clicked.
    UploadAndAnalyze,
    /// "Start Analysis" clicked with a selected option.
    OptionConfirmed(AnalysisType),
    /// Options dialog cancelled.
    OptionsCancelled,
    /// File picked in the image-upload modal.
    ReferenceImageSelected(MediaFile),
    /// "Use Image" clicked.
    ReferenceImageConfirmed,
    /// Image-upload modal closed without confirming.
    ImageUploadClosed,
    /// "Terminate & Generate Report" clicked.
    Terminate,
    /// Progress generator's completion callback.
    ProgressCompleted,
    /// "New Analysis" clicked.
    NewAnalysis,
    /// "Back to Home" clicked.
    BackToHome,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Show a toast.
    Notify(Notification),
    /// Navigate to the login view.
    RedirectToLogin,
    /// Begin the fake face comparison for the pending image.
    StartImageMatch(AnalysisType),
    /// Drop any pending or resolved face comparison with the modal.
    CancelImageMatch,
    /// Mount a fresh progress run and activate the timers.
    StartAnalysis {
        /// Selected analysis type.
        analysis_type: AnalysisType,
        /// `true` when the report log must be remounted.
        fresh_log: bool,
    },
    /// Unmount progress and deactivate timers; the log stays.
    StopAnalysis,
    /// Unmount everything analysis-related.
    ReturnHome,
}

/// State of the reference image modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUploadModal {
    /// Selected but not yet confirmed image.
    pub pending_image: Option<MediaFile>,
}

/// Immutable render view of the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Current mode.
    pub state: AppState,
    /// Selected analysis type.
    pub selection: Option<AnalysisType>,
    /// Attached video name.
    pub video_name: Option<String>,
    /// Attached reference image name.
    pub reference_image_name: Option<String>,
    /// Whether the image-upload modal is open.
    pub image_upload_open: bool,
    /// Signed-in identity for the logout affordance.
    pub identity: Option<String>,
}

impl ViewSnapshot {
    /// Progress panel is mounted only while analyzing.
    pub fn progress_mounted(&self) -> bool {
        self.state == AppState::Analyzing
    }

    /// Report panel is mounted while analyzing and after completion.
    pub fn report_mounted(&self) -> bool {
        matches!(self.state, AppState::Analyzing | AppState::Completed)
    }

    /// Heat map and report timers run only while analyzing.
    pub fn timers_active(&self) -> bool {
        self.state == AppState::Analyzing
    }

    /// [`neuro_sight_core::SYSTEM_ALERTS`] and
    /// [`neuro_sight_core::ANALYSIS_CENTER_STATS`] are shown on the landing view.
    pub fn home_panels_visible(&self) -> bool {
        self.state == AppState::Home
    }
}

/// Single owner of the dashboard's view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewController {
    state: AppState,
    selection: Option<AnalysisType>,
    uploads: UploadedFiles,
    image_upload: Option<ImageUploadModal>,
    session_required: bool,
    auth: UiAuthState,
    identity: Option<String>,
}

impl ViewController {
    /// Creates a controller at `home`. With `session_required`, leaving home
    /// needs a signed-in session.
    pub fn new(session_required: bool) -> Self {
        Self {
            state: AppState::Home,
            selection: None,
            uploads: UploadedFiles::default(),
            image_upload: None,
            session_required,
            auth: UiAuthState::Unknown,
            identity: None,
        }
    }

    /// Records the latest session lookup.
    pub fn set_session(&mut self, identity: Option<String>) {
        self.auth = if identity.is_some() {
            UiAuthState::SignedIn
        } else {
            UiAuthState::SignedOut
        };
        self.identity = identity;
    }

    /// Current mode.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Selected analysis type.
    pub fn selection(&self) -> Option<AnalysisType> {
        self.selection
    }

    /// Attached files.
    pub fn uploads(&self) -> &UploadedFiles {
        &self.uploads
    }

    /// Session projection.
    pub fn auth(&self) -> UiAuthState {
        self.auth
    }

    /// Image-upload modal, when open.
    pub fn image_upload(&self) -> Option<&ImageUploadModal> {
        self.image_upload.as_ref()
    }

    /// Returns `true` when "Upload & Analyze" would reach the options dialog.
    pub fn can_upload_and_analyze(&self) -> bool {
        self.state == AppState::Home && self.session_allows_upload() && self.uploads.has_video()
    }

    fn session_allows_upload(&self) -> bool {
        !self.session_required || self.auth == UiAuthState::SignedIn
    }

    /// Applies one event and returns the effects to carry out.
    pub fn handle(&mut self, event: UiEvent) -> Vec<UiEffect> {
        match (self.state, event) {
            (_, UiEvent::BackToHome) => self.go_home(),

            (AppState::Home, UiEvent::VideoSelected(file)) => {
                // Wrong types are dropped without feedback.
                self.uploads.attach_video(file);
                Vec::new()
            }
            (AppState::Home, UiEvent::UploadAndAnalyze) => {
                if !self.session_allows_upload() {
                    return vec![
                        UiEffect::Notify(Notification::error(
                            "Authentication required",
                            "Please sign in to upload and analyze videos.",
                        )),
                        UiEffect::RedirectToLogin,
                    ];
                }
                if !self.uploads.has_video() {
                    return vec![UiEffect::Notify(Notification::error(
                        "No video uploaded",
                        "Please upload a video file before starting analysis.",
                    ))];
                }
                self.state = AppState::Options;
                Vec::new()
            }

            (AppState::Options, UiEvent::OptionConfirmed(analysis_type)) => {
                if self.image_upload.is_some() {
                    return Vec::new();
                }
                self.selection = Some(analysis_type);
                if analysis_type.requires_reference_image() {
                    self.image_upload = Some(ImageUploadModal::default());
                    return Vec::new();
                }
                self.begin_fresh_analysis(analysis_type)
            }
            (AppState::Options, UiEvent::OptionsCancelled) => {
                self.state = AppState::Home;
                self.selection = None;
                self.image_upload = None;
                vec![UiEffect::CancelImageMatch]
            }
            (AppState::Options, UiEvent::ReferenceImageSelected(file)) => {
                let Some(modal) = self.image_upload.as_mut() else {
                    return Vec::new();
                };
                if !file.is_reference_image() {
                    return Vec::new();
                }
                modal.pending_image = Some(file);
                match self.selection {
                    Some(analysis_type) => vec![UiEffect::StartImageMatch(analysis_type)],
                    None => Vec::new(),
                }
            }
            (AppState::Options, UiEvent::ReferenceImageConfirmed) => {
                let pending = self
                    .image_upload
                    .as_mut()
                    .and_then(|modal| modal.pending_image.take());
                let (Some(image), Some(analysis_type)) = (pending, self.selection) else {
                    return Vec::new();
                };
                self.uploads.attach_reference_image(image);
                self.image_upload = None;
                self.begin_fresh_analysis(analysis_type)
            }
            (AppState::Options, UiEvent::ImageUploadClosed) => {
                if self.image_upload.take().is_none() {
                    return Vec::new();
                }
                self.selection = None;
                vec![UiEffect::CancelImageMatch]
            }

            (AppState::Analyzing, UiEvent::Terminate | UiEvent::ProgressCompleted) => {
                self.state = AppState::Completed;
                vec![UiEffect::StopAnalysis]
            }

            (AppState::Completed, UiEvent::NewAnalysis) => match self.selection {
                Some(analysis_type) => {
                    self.state = AppState::Analyzing;
                    vec![UiEffect::StartAnalysis {
                        analysis_type,
                        fresh_log: false,
                    }]
                }
                None => Vec::new(),
            },

            _ => Vec::new(),
        }
    }

    fn begin_fresh_analysis(&mut self, analysis_type: AnalysisType) -> Vec<UiEffect> {
        self.state = AppState::Analyzing;
        vec![UiEffect::StartAnalysis {
            analysis_type,
            fresh_log: true,
        }]
    }

    fn go_home(&mut self) -> Vec<UiEffect> {
        self.state = AppState::Home;
        self.selection = None;
        self.image_upload = None;
        self.uploads.clear();
        vec![UiEffect::ReturnHome]
    }

    /// Immutable render snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            state: self.state,
            selection: self.selection,
            video_name: self.uploads.video.as_ref().map(|file| file.name.clone()),
            reference_image_name: self
                .uploads
                .reference_image
                .as_ref()
                .map(|file| file.name.clone()),
            image_upload_open: self.image_upload.is_some(),
            identity: self.identity.clone(),
        }
    }
}
