//! Simulated reference image face match.

use neuro_sight_core::AnalysisType;

use crate::EventSource;

/// Fake "analyzing facial features" delay.
pub const IMAGE_MATCH_DELAY_MS: u64 = 2_000;

/// Probability of reporting a match.
pub const IMAGE_MATCH_PROBABILITY: f64 = 0.7;

/// State of the simulated match shown inside the upload modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    /// No image analyzed.
    Idle,
    /// Waiting out the fake delay.
    Analyzing {
        /// When the outcome is revealed.
        ready_at_ms: u64,
    },
    /// "Face match detected".
    Matched,
    /// "No face match found".
    NoMatch,
}

/// Coin flip dressed up as a face comparison.
#[derive(Debug, Clone)]
pub struct ImageMatchSimulator {
    status: MatchStatus,
}

impl ImageMatchSimulator {
    /// Creates an idle simulator.
    pub fn new() -> Self {
        Self {
            status: MatchStatus::Idle,
        }
    }

    /// Starts a fake comparison when `analysis_type` uses face matching.
    ///
    /// A new selection restarts the delay. Returns `true` if started.
    pub fn on_image_selected(&mut self, analysis_type: AnalysisType, now_ms: u64) -> bool {
        if !analysis_type.requires_reference_image() {
            return false;
        }
        self.status = MatchStatus::Analyzing {
            ready_at_ms: now_ms.saturating_add(IMAGE_MATCH_DELAY_MS),
        };
        true
    }

    /// Resolves a pending comparison once its delay has elapsed.
    pub fn advance(&mut self, now_ms: u64, source: &mut dyn EventSource) -> Option<MatchStatus> {
        let MatchStatus::Analyzing { ready_at_ms } = self.status else {
            return None;
        };
        if ready_at_ms > now_ms {
            return None;
        }

        self.status = if source.chance(IMAGE_MATCH_PROBABILITY) {
            MatchStatus::Matched
        } else {
            MatchStatus::NoMatch
        };
        Some(self.status)
    }

    /// Time the pending comparison resolves, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match self.status {
            MatchStatus::Analyzing { ready_at_ms } => Some(ready_at_ms),
            MatchStatus::Idle | MatchStatus::Matched | MatchStatus::NoMatch => None,
        }
    }

    /// Current status.
    pub fn status(&self) -> MatchStatus {
        self.status
    }

    /// Returns to idle, dropping any pending comparison.
    pub fn reset(&mut self) {
        self.status = MatchStatus::Idle;
    }
}

impl Default for ImageMatchSimulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedEventSource;

    #[test]
    fn match_resolves_after_delay() {
        let mut source = ScriptedEventSource::new(vec![0.69, 0.7]);
        let mut simulator = ImageMatchSimulator::new();

        assert!(simulator.on_image_selected(AnalysisType::FacialRecognition, 1_000));
        assert_eq!(simulator.advance(2_999, &mut source), None);
        assert_eq!(simulator.advance(3_000, &mut source), Some(MatchStatus::Matched));
        assert_eq!(simulator.advance(9_000, &mut source), None);

        assert!(simulator.on_image_selected(AnalysisType::All, 10_000));
        assert_eq!(simulator.advance(12_000, &mut source), Some(MatchStatus::NoMatch));
    }

    #[test]
    fn non_face_modes_skip_matching() {
        let mut simulator = ImageMatchSimulator::new();
        assert!(!simulator.on_image_selected(AnalysisType::ObjectDetection, 0));
        assert_eq!(simulator.status(), MatchStatus::Idle);
    }
}
