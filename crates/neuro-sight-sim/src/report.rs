//! Simulated report log.

use neuro_sight_core::{
    AnalysisType, ReportCategory, ReportEntry, Severity, SeverityCounts, clock_label,
};

use crate::{EventSource, Interval};

/// Period of the report timer.
pub const REPORT_INTERVAL_MS: u64 = 2_000;

/// Detail line of the entry emitted on mount.
pub const INITIAL_ENTRY_DETAIL: &str = "System parameters optimized for selected analysis type";

const THREAT_CATEGORY_PROBABILITY: f64 = 0.3;
const FRAME_RANGE: usize = 1_000;
const CONFIDENCE_FLOOR: f64 = 85.0;
const CONFIDENCE_CEILING: f64 = 100.0;

/// Fixed text and severity of one generated log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportTemplate {
    /// Entry text.
    pub text: &'static str,
    /// Entry severity.
    pub severity: Severity,
}

const fn template(text: &'static str, severity: Severity) -> ReportTemplate {
    ReportTemplate { text, severity }
}

static OBJECT_DETECTION: [ReportTemplate; 4] = [
    template(
        "Vehicle detected: Sedan, License plate partially visible",
        Severity::Low,
    ),
    template(
        "Person detected: Individual walking, normal gait pattern",
        Severity::Low,
    ),
    template(
        "Unidentified object: Large bag left unattended",
        Severity::Medium,
    ),
    template(
        "Multiple vehicles in frame: Traffic pattern analysis",
        Severity::Low,
    ),
];

static FACIAL_RECOGNITION: [ReportTemplate; 4] = [
    template("Face detected: Processing biometric markers", Severity::Low),
    template(
        "Individual identified: Cross-referencing database",
        Severity::Medium,
    ),
    template(
        "Unknown individual: No database match found",
        Severity::Medium,
    ),
    template(
        "Facial expression analysis: Stress indicators detected",
        Severity::High,
    ),
];

static SUSPICIOUS_ACTIVITY: [ReportTemplate; 4] = [
    template(
        "Loitering detected: Individual stationary for 3+ minutes",
        Severity::Medium,
    ),
    template("Rapid movement: Running pattern detected", Severity::Medium),
    template(
        "Unusual behavior: Repetitive motion patterns",
        Severity::High,
    ),
    template(
        "Group formation: Multiple individuals converging",
        Severity::High,
    ),
];

static COMPLETE: [ReportTemplate; 4] = [
    template(
        "Multi-modal analysis: Cross-referencing all detection systems",
        Severity::Medium,
    ),
    template(
        "Threat correlation: Combining facial and behavioral data",
        Severity::High,
    ),
    template(
        "Environmental analysis: Weather and lighting conditions optimal",
        Severity::Low,
    ),
    template(
        "System performance: All modules operating at 98.7% efficiency",
        Severity::Low,
    ),
];

/// Template list for an analysis type.
pub fn templates_for(analysis_type: AnalysisType) -> &'static [ReportTemplate; 4] {
    match analysis_type {
        AnalysisType::ObjectDetection => &OBJECT_DETECTION,
        AnalysisType::FacialRecognition => &FACIAL_RECOGNITION,
        AnalysisType::SuspiciousActivity => &SUSPICIOUS_ACTIVITY,
        AnalysisType::All => &COMPLETE,
    }
}

/// Draws one templated entry stamped at `now_ms`.
///
/// Draw order: template, category coin, frame number, confidence.
pub fn generate_entry(
    analysis_type: AnalysisType,
    source: &mut dyn EventSource,
    now_ms: u64,
) -> ReportEntry {
    let templates = templates_for(analysis_type);
    let chosen = templates[source.pick(templates.len())];
    let category = if source.chance(THREAT_CATEGORY_PROBABILITY) {
        ReportCategory::Threat
    } else {
        ReportCategory::Detection
    };
    let frame = source.pick(FRAME_RANGE) + 1;
    let confidence = source.uniform(CONFIDENCE_FLOOR, CONFIDENCE_CEILING);

    ReportEntry {
        timestamp: clock_label(now_ms),
        category,
        severity: chosen.severity,
        text: chosen.text.to_string(),
        detail: Some(format!("Frame: {frame}, Confidence: {confidence:.1}%")),
    }
}

/// Append-only analysis log fed by a 2 s timer.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    analysis_type: AnalysisType,
    entries: Vec<ReportEntry>,
    interval: Interval,
    mounted_at_ms: u64,
}

impl ReportGenerator {
    /// Mounts a log seeded with the "analysis initiated" entry.
    pub fn mount(analysis_type: AnalysisType, now_ms: u64, active: bool) -> Self {
        let initial = ReportEntry {
            timestamp: clock_label(now_ms),
            category: ReportCategory::Analysis,
            severity: Severity::Medium,
            text: format!("Analysis initiated: {}", analysis_type.report_label()),
            detail: Some(INITIAL_ENTRY_DETAIL.to_string()),
        };

        let mut generator = Self {
            analysis_type,
            entries: vec![initial],
            interval: Interval::every(REPORT_INTERVAL_MS),
            mounted_at_ms: now_ms,
        };
        generator.set_active(active, now_ms);
        generator
    }

    /// Starts or cancels the timer. Re-activating an active log is a no-op.
    pub fn set_active(&mut self, active: bool, now_ms: u64) {
        match (active, self.interval.is_active()) {
            (true, false) => self.interval.start(now_ms),
            (false, true) => self.interval.cancel(),
            _ => {}
        }
    }

    /// Returns `true` while the timer runs.
    pub fn is_active(&self) -> bool {
        self.interval.is_active()
    }

    /// Next scheduled firing, if active.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.interval.next_due_ms()
    }

    /// Appends one entry per firing due at `now_ms`; returns how many.
    pub fn advance(&mut self, now_ms: u64, source: &mut dyn EventSource) -> usize {
        let mut appended = 0;
        while let Some(fired_at) = self.interval.pop_due(now_ms) {
            self.entries
                .push(generate_entry(self.analysis_type, source, fired_at));
            appended += 1;
        }
        appended
    }

    /// Log in insertion order.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Analysis type the log was mounted for.
    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    /// Mount time, used for the exported duration.
    pub fn mounted_at_ms(&self) -> u64 {
        self.mounted_at_ms
    }

    /// Per-severity counts over the whole log.
    pub fn summary(&self) -> SeverityCounts {
        SeverityCounts::from_entries(&self.entries)
    }
}
