#![warn(missing_docs)]
//! # neuro-sight-report
//!
//! ## Purpose
//! Turns the analysis log into the downloadable report document.
//!
//! ## Responsibilities
//! - Summarize a log by severity and render the fixed plain-text layout.
//! - Name exports `neuro-sight-report-<epoch-ms>.txt` and write them to disk.
//! - Provide a versioned JSON snapshot of the same report for tooling.
//!
//! ## Data flow
//! Report generator entries -> [`ReportDocument::new`] -> [`ReportDocument::export`]
//! -> [`ExportedReport::write_to_dir`] (or [`ReportDocument::snapshot`] for JSON).
//!
//! ## Ownership and lifetimes
//! Documents own a copy of the log taken at export time; later log growth
//! does not change an already exported document.
//!
//! ## Error model
//! Exporting an empty log, IO failures and JSON codec failures surface as
//! [`ReportError`].

use std::path::{Path, PathBuf};

use neuro_sight_core::{AnalysisType, ReportEntry, SeverityCounts, datetime_label};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical schema tag for v1 report snapshots.
pub const REPORT_SCHEMA_VERSION_V1: &str = "v1";

/// MIME type of the exported document.
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// File name prefix of exported documents.
pub const EXPORT_FILE_PREFIX: &str = "neuro-sight-report-";

/// Fixed closing recommendations.
pub const RECOMMENDATIONS: [&str; 4] = [
    "Review high priority alerts for immediate action",
    "Monitor identified individuals and objects",
    "Continue surveillance in detected threat zones",
    "Update security protocols based on findings",
];

const MISSING_DETAIL: &str = "No additional details";

/// Report assembled from a log at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    analysis_type: AnalysisType,
    started_at_ms: u64,
    generated_at_ms: u64,
    entries: Vec<ReportEntry>,
}

impl ReportDocument {
    /// Builds a document from a non-empty log.
    ///
    /// # Errors
    /// Returns [`ReportError::EmptyLog`] when `entries` is empty.
    pub fn new(
        analysis_type: AnalysisType,
        started_at_ms: u64,
        generated_at_ms: u64,
        entries: &[ReportEntry],
    ) -> Result<Self, ReportError> {
        if entries.is_empty() {
            return Err(ReportError::EmptyLog);
        }

        Ok(Self {
            analysis_type,
            started_at_ms,
            generated_at_ms,
            entries: entries.to_vec(),
        })
    }

    /// Number of logged events.
    pub fn total_events(&self) -> usize {
        self.entries.len()
    }

    /// Per-severity counts.
    pub fn summary(&self) -> SeverityCounts {
        SeverityCounts::from_entries(&self.entries)
    }

    /// Whole seconds between log mount and generation.
    pub fn duration_secs(&self) -> u64 {
        self.generated_at_ms.saturating_sub(self.started_at_ms) / 1_000
    }

    /// Renders the plain-text layout.
    pub fn render_text(&self) -> String {
        let summary = self.summary();
        let mut lines = vec![
            "NEURO SIGHT - ANALYSIS REPORT".to_string(),
            format!("Generated: {}", datetime_label(self.generated_at_ms)),
            format!("Analysis Type: {}", self.analysis_type.report_label()),
            format!("Duration: {} seconds", self.duration_secs()),
            String::new(),
            "EXECUTIVE SUMMARY:".to_string(),
            format!("{} total events detected", self.total_events()),
            format!("{} critical priority alerts", summary.critical),
            format!("{} high priority alerts", summary.high),
            format!("{} medium priority alerts", summary.medium),
            format!("{} low priority events", summary.low),
            String::new(),
            "DETAILED TIMELINE:".to_string(),
        ];

        for (index, entry) in self.entries.iter().enumerate() {
            if index > 0 {
                lines.push(String::new());
            }
            lines.push(format!(
                "[{}] {}",
                entry.timestamp,
                entry.text.to_uppercase()
            ));
            lines.push(format!(
                "   Severity: {}",
                entry.severity.as_str().to_uppercase()
            ));
            lines.push(format!(
                "   {}",
                entry.detail.as_deref().unwrap_or(MISSING_DETAIL)
            ));
        }

        lines.push(String::new());
        lines.push("RECOMMENDATIONS:".to_string());
        lines.extend(RECOMMENDATIONS.iter().map(|line| format!("- {line}")));

        let mut body = lines.join("\n");
        body.push('\n');
        body
    }

    /// Packages the rendered text as a downloadable file.
    pub fn export(&self) -> ExportedReport {
        ExportedReport {
            file_name: export_file_name(self.generated_at_ms),
            mime_type: EXPORT_MIME_TYPE,
            body: self.render_text(),
        }
    }

    /// Machine-readable snapshot of the same report.
    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            schema_version: REPORT_SCHEMA_VERSION_V1.to_string(),
            analysis_type: self.analysis_type,
            generated_at_ms: self.generated_at_ms,
            duration_secs: self.duration_secs(),
            total_events: self.total_events(),
            summary: self.summary(),
            entries: self.entries.clone(),
        }
    }
}

/// Export file name for a generation timestamp.
pub fn export_file_name(epoch_ms: u64) -> String {
    format!("{EXPORT_FILE_PREFIX}{epoch_ms}.txt")
}

/// Downloadable text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    /// `neuro-sight-report-<epoch-ms>.txt`.
    pub file_name: String,
    /// Always [`EXPORT_MIME_TYPE`].
    pub mime_type: &'static str,
    /// Rendered document.
    pub body: String,
}

impl ExportedReport {
    /// Writes the document into `dir` and returns the file path.
    ///
    /// # Errors
    /// Returns [`ReportError::Io`] when the directory cannot be created or the
    /// file cannot be written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.body.as_bytes())?;
        Ok(path)
    }
}

/// Versioned JSON form of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    /// Snapshot schema version.
    pub schema_version: String,
    /// Analysis type the log was produced for.
    pub analysis_type: AnalysisType,
    /// Generation time in Unix epoch milliseconds.
    pub generated_at_ms: u64,
    /// Whole seconds the log was mounted.
    pub duration_secs: u64,
    /// Equals `entries.len()`.
    pub total_events: usize,
    /// Per-severity counts over `entries`.
    pub summary: SeverityCounts,
    /// Full log.
    pub entries: Vec<ReportEntry>,
}

impl ReportSnapshot {
    /// Serializes to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`ReportError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, ReportError> {
        serde_json::to_vec(self).map_err(ReportError::Codec)
    }

    /// Deserializes and checks the snapshot against its own invariants.
    ///
    /// # Errors
    /// Returns [`ReportError::Codec`] for invalid JSON,
    /// [`ReportError::EmptyLog`] when `entries` is empty and
    /// [`ReportError::InvalidSnapshot`] when the version is not
    /// [`REPORT_SCHEMA_VERSION_V1`] or the totals or summary disagree with
    /// `entries`.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, ReportError> {
        let parsed: Self = serde_json::from_slice(raw).map_err(ReportError::Codec)?;
        if parsed.schema_version != REPORT_SCHEMA_VERSION_V1 {
            return Err(ReportError::InvalidSnapshot(format!(
                "unsupported schema_version {:?}",
                parsed.schema_version
            )));
        }
        if parsed.entries.is_empty() {
            return Err(ReportError::EmptyLog);
        }
        if parsed.total_events != parsed.entries.len() {
            return Err(ReportError::InvalidSnapshot(format!(
                "total_events {} does not match {} entries",
                parsed.total_events,
                parsed.entries.len()
            )));
        }
        if parsed.summary != SeverityCounts::from_entries(&parsed.entries) {
            return Err(ReportError::InvalidSnapshot(
                "summary does not match entries".to_string(),
            ));
        }
        Ok(parsed)
    }
}

/// Report export errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Nothing has been logged yet.
    #[error("report log is empty")]
    EmptyLog,
    /// Writing the export failed.
    #[error("report io failure: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding/decoding failed.
    #[error("report codec failure: {0}")]
    Codec(#[from] serde_json::Error),
    /// Snapshot violates its own invariants.
    #[error("invalid report snapshot: {0}")]
    InvalidSnapshot(String),
}
