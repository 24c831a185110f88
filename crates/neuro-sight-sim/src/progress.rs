//! Simulated analysis progress.

use neuro_sight_core::AnalysisType;

use crate::{EventSource, Interval};

/// Period of the progress timer.
pub const PROGRESS_INTERVAL_MS: u64 = 800;

/// Delay between reaching 100 % and the completion callback.
pub const COMPLETION_DELAY_MS: u64 = 1_000;

const MAX_INCREMENT: f64 = 3.0;
const PHASE_BUCKET: f64 = 15.0;
const DETECTION_PROBABILITY: f64 = 0.3;
const THREAT_PROBABILITY: f64 = 0.1;

/// Phase labels indexed by `min(floor(progress / 15), 6)`.
pub const PHASES: [&str; 7] = [
    "Initializing analysis modules",
    "Processing video frames",
    "Running AI detection algorithms",
    "Analyzing behavioral patterns",
    "Cross-referencing threat databases",
    "Generating comprehensive report",
    "Analysis complete",
];

/// Lifecycle of one progress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStatus {
    /// Timer advancing.
    Running,
    /// Timer stopped by the user; counters kept.
    Paused,
    /// Reached 100 %.
    Complete,
    /// Stopped by the user before completion.
    Terminated,
}

/// Callback-worthy outcome emitted by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSignal {
    /// Completion delay elapsed after reaching 100 %.
    Completed,
    /// User terminated the run.
    Terminated,
}

/// Result of one timer firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressStep {
    /// Cumulative progress after the step, clamped to 100.
    pub progress: f64,
    /// Phase label after the step.
    pub phase: &'static str,
    /// Whether the detection counter was bumped.
    pub detection: bool,
    /// Whether the threat counter was bumped.
    pub threat: bool,
    /// Whether this step reached 100 %.
    pub reached_completion: bool,
}

/// Render-ready view of the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    /// Selected analysis type.
    pub analysis_type: AnalysisType,
    /// Exact cumulative progress.
    pub progress: f64,
    /// Progress rounded for display.
    pub percent: u8,
    /// Current phase label.
    pub phase: &'static str,
    /// Simulated detections so far.
    pub detections: u32,
    /// Simulated threats so far.
    pub threats: u32,
    /// Run lifecycle.
    pub status: ProgressStatus,
}

/// Timer-driven fake progress bar.
#[derive(Debug, Clone)]
pub struct ProgressGenerator {
    analysis_type: AnalysisType,
    interval: Interval,
    progress: f64,
    phase_index: usize,
    detections: u32,
    threats: u32,
    status: ProgressStatus,
    completion_due_ms: Option<u64>,
    completion_fired: bool,
}

impl ProgressGenerator {
    /// Mounts a fresh run that starts advancing immediately.
    pub fn mount(analysis_type: AnalysisType, now_ms: u64) -> Self {
        let mut interval = Interval::every(PROGRESS_INTERVAL_MS);
        interval.start(now_ms);
        Self {
            analysis_type,
            interval,
            progress: 0.0,
            phase_index: 0,
            detections: 0,
            threats: 0,
            status: ProgressStatus::Running,
            completion_due_ms: None,
            completion_fired: false,
        }
    }

    /// Applies one increment. Returns `None` unless the run is `Running`.
    pub fn step(&mut self, source: &mut dyn EventSource) -> Option<ProgressStep> {
        if self.status != ProgressStatus::Running {
            return None;
        }

        let increment = source.uniform(0.0, MAX_INCREMENT);
        let next = (self.progress + increment).min(100.0);
        self.progress = next;
        self.phase_index = ((next / PHASE_BUCKET) as usize).min(PHASES.len() - 1);

        let detection = source.chance(DETECTION_PROBABILITY);
        if detection {
            self.detections += 1;
        }
        let threat = source.chance(THREAT_PROBABILITY);
        if threat {
            self.threats += 1;
        }

        let reached_completion = next >= 100.0;
        if reached_completion {
            self.phase_index = PHASES.len() - 1;
            self.status = ProgressStatus::Complete;
            self.interval.cancel();
        }

        Some(ProgressStep {
            progress: self.progress,
            phase: PHASES[self.phase_index],
            detection,
            threat,
            reached_completion,
        })
    }

    /// Runs every firing due at `now_ms` and reports the completion callback
    /// once its delay has elapsed.
    pub fn advance(&mut self, now_ms: u64, source: &mut dyn EventSource) -> Option<ProgressSignal> {
        while let Some(fired_at) = self.interval.pop_due(now_ms) {
            if let Some(step) = self.step(source)
                && step.reached_completion
            {
                self.completion_due_ms = Some(fired_at.saturating_add(COMPLETION_DELAY_MS));
            }
        }

        if let Some(due) = self.completion_due_ms
            && due <= now_ms
            && !self.completion_fired
        {
            self.completion_fired = true;
            self.completion_due_ms = None;
            return Some(ProgressSignal::Completed);
        }
        None
    }

    /// Stops the timer without touching counters. Returns `true` if paused.
    pub fn pause(&mut self) -> bool {
        if self.status != ProgressStatus::Running {
            return false;
        }
        self.status = ProgressStatus::Paused;
        self.interval.cancel();
        true
    }

    /// Restarts a paused run. Completed or terminated runs stay put.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.status != ProgressStatus::Paused {
            return false;
        }
        self.status = ProgressStatus::Running;
        self.interval.start(now_ms);
        true
    }

    /// Pause/resume toggle bound to the single control button.
    pub fn toggle_pause(&mut self, now_ms: u64) -> ProgressStatus {
        if !self.pause() {
            self.resume(now_ms);
        }
        self.status
    }

    /// Stops the run and returns the termination signal.
    ///
    /// Returns `None` once the run has already completed or been terminated.
    pub fn terminate(&mut self) -> Option<ProgressSignal> {
        match self.status {
            ProgressStatus::Running | ProgressStatus::Paused => {
                self.status = ProgressStatus::Terminated;
                self.interval.cancel();
                self.completion_due_ms = None;
                Some(ProgressSignal::Terminated)
            }
            ProgressStatus::Complete | ProgressStatus::Terminated => None,
        }
    }

    /// Returns `true` while the timer is advancing.
    pub fn is_running(&self) -> bool {
        self.status == ProgressStatus::Running
    }

    /// Earliest time at which [`ProgressGenerator::advance`] has work to do.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        let completion = self.completion_due_ms.filter(|_| !self.completion_fired);
        match (self.interval.next_due_ms(), completion) {
            (Some(tick), Some(done)) => Some(tick.min(done)),
            (tick, done) => tick.or(done),
        }
    }

    /// Returns `true` once the completion callback has been delivered.
    pub fn completion_fired(&self) -> bool {
        self.completion_fired
    }

    /// Current render snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            analysis_type: self.analysis_type,
            progress: self.progress,
            percent: self.progress.round() as u8,
            phase: PHASES[self.phase_index],
            detections: self.detections,
            threats: self.threats,
            status: self.status,
        }
    }
}
