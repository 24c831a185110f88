#![warn(missing_docs)]
//! # neuro-sight-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `neuro-sight` workspace.
//!
//! ## Responsibilities
//! - Represent analysis selections, severities, report entries and threat points.
//! - Hold the rolling threat-point buffer displayed by the heat map.
//! - Carry the static alert list and statistics tiles of the landing view.
//! - Collect uploaded media handles and apply superficial MIME checks.
//! - Render wall-clock labels for log lines and exported documents.
//!
//! ## Data flow
//! The view controller stores [`UploadedFiles`] and the selected
//! [`AnalysisType`]. Simulation generators emit [`ReportEntry`] and
//! [`ThreatPoint`] values, and the exporter summarizes entries with
//! [`SeverityCounts`].
//!
//! ## Ownership and lifetimes
//! All model values own their strings so snapshots can be cloned freely between
//! the controller, generators and exporter.
//!
//! ## Error model
//! Construction-time validation failures (zero buffer capacity, out-of-range
//! coordinates, unknown analysis ids) return [`CoreError`].
//!
//! ## Example
//! ```rust
//! use neuro_sight_core::{Severity, ThreatBuffer, ThreatPoint};
//!
//! let mut buffer = ThreatBuffer::new(2).expect("valid capacity");
//! for id in 0..3 {
//!     let point = ThreatPoint::new(id.to_string(), 50.0, 50.0, Severity::Low, 0, "Motion anomaly")
//!         .expect("valid point");
//!     buffer.push(point);
//! }
//! assert_eq!(buffer.len(), 2);
//! assert_eq!(buffer.points().next().map(|point| point.id.as_str()), Some("1"));
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Maximum number of points the heat map keeps on screen.
pub const HEAT_MAP_CAPACITY: usize = 5;

/// MIME prefix accepted for the analyzed video.
pub const VIDEO_MIME_PREFIX: &str = "video/";

/// MIME types accepted for the reference image.
pub const REFERENCE_IMAGE_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];

/// Detection mode picked by the user in the options dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisType {
    /// Objects, vehicles and unattended items.
    ObjectDetection,
    /// Faces, identities and expressions.
    FacialRecognition,
    /// Behavioral anomalies.
    SuspiciousActivity,
    /// Every detection module at once.
    All,
}

impl AnalysisType {
    /// Every selectable analysis type in picker order.
    pub const ALL: [AnalysisType; 4] = [
        AnalysisType::ObjectDetection,
        AnalysisType::FacialRecognition,
        AnalysisType::SuspiciousActivity,
        AnalysisType::All,
    ];

    /// Stable identifier used in configuration and serialized reports.
    pub fn id(self) -> &'static str {
        match self {
            AnalysisType::ObjectDetection => "object-detection",
            AnalysisType::FacialRecognition => "facial-recognition",
            AnalysisType::SuspiciousActivity => "suspicious-activity",
            AnalysisType::All => "all",
        }
    }

    /// Title shown on the option card.
    pub fn title(self) -> &'static str {
        match self {
            AnalysisType::ObjectDetection => "Object Detection",
            AnalysisType::FacialRecognition => "Facial Recognition",
            AnalysisType::SuspiciousActivity => "Suspicious Activity Detection",
            AnalysisType::All => "Complete Analysis",
        }
    }

    /// One-line description shown under the option title.
    pub fn description(self) -> &'static str {
        match self {
            AnalysisType::ObjectDetection => {
                "Identify and track objects, vehicles, and items in the video"
            }
            AnalysisType::FacialRecognition => {
                "Detect, identify, and analyze facial features and expressions"
            }
            AnalysisType::SuspiciousActivity => {
                "Monitor for unusual behaviors and potential security threats"
            }
            AnalysisType::All => "Run all detection modules for comprehensive threat assessment",
        }
    }

    /// Label used in the progress panel header.
    pub fn progress_label(self) -> &'static str {
        self.title()
    }

    /// Label used by the report log and exported document.
    pub fn report_label(self) -> &'static str {
        match self {
            AnalysisType::ObjectDetection => "Object Detection Analysis",
            AnalysisType::FacialRecognition => "Facial Recognition Analysis",
            AnalysisType::SuspiciousActivity => "Suspicious Activity Detection",
            AnalysisType::All => "Complete Multi-Modal Analysis",
        }
    }

    /// Returns `true` when the flow must collect a reference image first.
    pub fn requires_reference_image(self) -> bool {
        matches!(self, AnalysisType::FacialRecognition | AnalysisType::All)
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AnalysisType {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        AnalysisType::ALL
            .into_iter()
            .find(|candidate| candidate.id() == normalized)
            .ok_or_else(|| CoreError::UnknownAnalysisType(raw.to_string()))
    }
}

/// Ordinal threat level shared by report entries and heat-map points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Routine observation.
    Low,
    /// Worth a second look.
    Medium,
    /// Needs attention.
    High,
    /// Needs immediate action.
    Critical,
}

impl Severity {
    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of report log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportCategory {
    /// Something was spotted.
    Detection,
    /// Pipeline bookkeeping.
    Analysis,
    /// Something was flagged as a threat.
    Threat,
    /// Roll-up line.
    Summary,
}

/// One immutable line of the analysis report log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Wall-clock label (`HH:MM:SS`) at insertion time.
    pub timestamp: String,
    /// Entry kind.
    pub category: ReportCategory,
    /// Entry severity.
    pub severity: Severity,
    /// Main text.
    pub text: String,
    /// Optional secondary line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Per-severity tallies used by exported summaries and the heat-map legend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    /// Number of low severity items.
    pub low: usize,
    /// Number of medium severity items.
    pub medium: usize,
    /// Number of high severity items.
    pub high: usize,
    /// Number of critical severity items.
    pub critical: usize,
}

impl SeverityCounts {
    /// Tallies an arbitrary sequence of severities.
    pub fn tally(severities: impl IntoIterator<Item = Severity>) -> Self {
        let mut counts = Self::default();
        for severity in severities {
            match severity {
                Severity::Low => counts.low += 1,
                Severity::Medium => counts.medium += 1,
                Severity::High => counts.high += 1,
                Severity::Critical => counts.critical += 1,
            }
        }
        counts
    }

    /// Tallies report entries by severity.
    pub fn from_entries(entries: &[ReportEntry]) -> Self {
        Self::tally(entries.iter().map(|entry| entry.severity))
    }

    /// Sum over all severities.
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

/// One point on the threat heat map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatPoint {
    /// Point identifier, unique within one buffer.
    pub id: String,
    /// Horizontal position in percent of the map width.
    pub x: f64,
    /// Vertical position in percent of the map height.
    pub y: f64,
    /// Threat level.
    pub severity: Severity,
    /// Detection time in Unix epoch milliseconds.
    pub detected_at_ms: u64,
    /// Tooltip text.
    pub description: String,
}

impl ThreatPoint {
    /// Constructs a validated threat point.
    ///
    /// # Errors
    /// Returns [`CoreError::CoordinateOutOfRange`] when `x` or `y` falls outside
    /// `[0, 100]` or is not finite.
    pub fn new(
        id: impl Into<String>,
        x: f64,
        y: f64,
        severity: Severity,
        detected_at_ms: u64,
        description: impl Into<String>,
    ) -> Result<Self, CoreError> {
        for (axis, value) in [("x", x), ("y", y)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(CoreError::CoordinateOutOfRange { axis, value });
            }
        }

        Ok(Self {
            id: id.into(),
            x,
            y,
            severity,
            detected_at_ms,
            description: description.into(),
        })
    }
}

/// Bounded FIFO of the most recent threat points.
#[derive(Debug, Clone)]
pub struct ThreatBuffer {
    capacity: usize,
    points: VecDeque<ThreatPoint>,
}

impl ThreatBuffer {
    /// Creates an empty buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidBufferCapacity`] when `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, CoreError> {
        if capacity == 0 {
            return Err(CoreError::InvalidBufferCapacity);
        }

        Ok(Self {
            capacity,
            points: VecDeque::with_capacity(capacity),
        })
    }

    /// Creates a heat-map sized buffer holding the three idle-display points.
    ///
    /// Seed timestamps are placed 2, 5 and 8 minutes before `now_ms`.
    pub fn with_seed_points(now_ms: u64) -> Self {
        const MINUTE_MS: u64 = 60_000;
        let seeds = [
            ("1", 15.0, 25.0, Severity::High, 2, "Suspicious movement detected"),
            ("2", 65.0, 40.0, Severity::Medium, 5, "Unidentified object"),
            ("3", 45.0, 70.0, Severity::Low, 8, "Motion anomaly"),
        ];

        let mut points = VecDeque::with_capacity(HEAT_MAP_CAPACITY);
        for (id, x, y, severity, minutes_ago, description) in seeds {
            points.push_back(ThreatPoint {
                id: id.to_string(),
                x,
                y,
                severity,
                detected_at_ms: now_ms.saturating_sub(minutes_ago * MINUTE_MS),
                description: description.to_string(),
            });
        }

        Self {
            capacity: HEAT_MAP_CAPACITY,
            points,
        }
    }

    /// Appends a point and returns the evicted oldest point, if any.
    ///
    /// Eviction is strictly first-in first-out and ignores severity.
    pub fn push(&mut self, point: ThreatPoint) -> Option<ThreatPoint> {
        let evicted = if self.points.len() == self.capacity {
            self.points.pop_front()
        } else {
            None
        };
        self.points.push_back(point);
        evicted
    }

    /// Iterates points from oldest to newest.
    pub fn points(&self) -> impl Iterator<Item = &ThreatPoint> {
        self.points.iter()
    }

    /// Returns the newest point.
    pub fn latest(&self) -> Option<&ThreatPoint> {
        self.points.back()
    }

    /// Per-severity counts of the buffered points.
    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::tally(self.points.iter().map(|point| point.severity))
    }

    /// Returns buffered point count.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` when no points are buffered.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Static alert shown on the landing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemAlert {
    /// Alert severity.
    pub severity: Severity,
    /// Subsystem that raised the alert.
    pub source: &'static str,
    /// Headline.
    pub title: &'static str,
    /// Body text.
    pub description: &'static str,
    /// Reported detection latency in milliseconds.
    pub detection_latency_ms: u64,
}

/// Alerts listed on the landing view, most severe first.
pub const SYSTEM_ALERTS: [SystemAlert; 3] = [
    SystemAlert {
        severity: Severity::High,
        source: "Upload Queue",
        title: "Analysis Complete - High Priority",
        description: "Security footage analysis revealed suspicious activity patterns",
        detection_latency_ms: 1_250,
    },
    SystemAlert {
        severity: Severity::Medium,
        source: "Analysis Engine",
        title: "New Upload Processing",
        description: "entrance_cam_morning.mp4 is currently being analyzed",
        detection_latency_ms: 850,
    },
    SystemAlert {
        severity: Severity::Low,
        source: "System Monitor",
        title: "System Health Check",
        description: "All AI analysis modules operating within normal parameters",
        detection_latency_ms: 2_100,
    },
];

/// One tile of the analysis-center statistics row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStat {
    /// Tile title.
    pub title: &'static str,
    /// Headline value.
    pub value: &'static str,
    /// Secondary value under the headline.
    pub subtitle: &'static str,
    /// Day-over-day change label.
    pub change: &'static str,
}

/// Statistics tiles shown on the landing view.
pub const ANALYSIS_CENTER_STATS: [DashboardStat; 4] = [
    DashboardStat {
        title: "Active Streams",
        value: "24",
        subtitle: "32",
        change: "+2 vs yesterday",
    },
    DashboardStat {
        title: "Threat Detection",
        value: "99.7%",
        subtitle: "100%",
        change: "+0.3% vs yesterday",
    },
    DashboardStat {
        title: "System Health",
        value: "Optimal",
        subtitle: "100%",
        change: "Stable vs yesterday",
    },
    DashboardStat {
        title: "Alerts Today",
        value: "7",
        subtitle: "Critical: 2",
        change: "-3 vs yesterday",
    },
];

/// Handle to a user-picked local file. Contents are never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// File name as reported by the picker.
    pub name: String,
    /// MIME type as reported by the picker.
    pub mime_type: String,
    /// File size in bytes.
    pub size_bytes: u64,
}

impl MediaFile {
    /// Creates a file handle.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Returns `true` for `video/*` handles.
    pub fn is_video(&self) -> bool {
        is_video_mime(&self.mime_type)
    }

    /// Returns `true` for accepted reference image handles.
    pub fn is_reference_image(&self) -> bool {
        is_reference_image_mime(&self.mime_type)
    }
}

/// Returns `true` when `mime_type` names a video.
pub fn is_video_mime(mime_type: &str) -> bool {
    mime_type
        .trim()
        .to_ascii_lowercase()
        .starts_with(VIDEO_MIME_PREFIX)
}

/// Returns `true` when `mime_type` is a PNG or JPEG image.
pub fn is_reference_image_mime(mime_type: &str) -> bool {
    let normalized = mime_type.trim().to_ascii_lowercase();
    REFERENCE_IMAGE_MIME_TYPES.contains(&normalized.as_str())
}

/// Files collected for one analysis session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFiles {
    /// Video to analyze.
    pub video: Option<MediaFile>,
    /// Reference image for face matching.
    pub reference_image: Option<MediaFile>,
}

impl UploadedFiles {
    /// Attaches a video, replacing any previous one.
    ///
    /// Returns `false` and leaves state untouched for non-video types.
    pub fn attach_video(&mut self, file: MediaFile) -> bool {
        if !file.is_video() {
            return false;
        }
        self.video = Some(file);
        true
    }

    /// Attaches a reference image, replacing any previous one.
    ///
    /// Returns `false` and leaves state untouched for unsupported types.
    pub fn attach_reference_image(&mut self, file: MediaFile) -> bool {
        if !file.is_reference_image() {
            return false;
        }
        self.reference_image = Some(file);
        true
    }

    /// Returns `true` when a video is attached.
    pub fn has_video(&self) -> bool {
        self.video.is_some()
    }

    /// Drops every attached file.
    pub fn clear(&mut self) {
        self.video = None;
        self.reference_image = None;
    }
}

const CLOCK_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[hour]:[minute]:[second]");
const DATETIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");

/// Formats epoch milliseconds as a UTC `HH:MM:SS` label.
pub fn clock_label(epoch_ms: u64) -> String {
    utc_from_epoch_ms(epoch_ms)
        .format(CLOCK_FORMAT)
        .unwrap_or_default()
}

/// Formats epoch milliseconds as a UTC `YYYY-MM-DD HH:MM:SS UTC` label.
pub fn datetime_label(epoch_ms: u64) -> String {
    utc_from_epoch_ms(epoch_ms)
        .format(DATETIME_FORMAT)
        .unwrap_or_default()
}

fn utc_from_epoch_ms(epoch_ms: u64) -> OffsetDateTime {
    let nanos = i128::from(epoch_ms) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

/// Error type for core model validation.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// Buffer capacity must be strictly positive.
    #[error("buffer capacity must be greater than zero")]
    InvalidBufferCapacity,
    /// Heat-map coordinates are percentages.
    #[error("{axis} coordinate {value} is outside [0, 100]")]
    CoordinateOutOfRange {
        /// Offending axis name.
        axis: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Analysis id is not one of the known selections.
    #[error("unknown analysis type: {0}")]
    UnknownAnalysisType(String),
}
