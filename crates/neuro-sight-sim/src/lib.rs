#![warn(missing_docs)]
//! # neuro-sight-sim
//!
//! ## Purpose
//! Produces every simulated "analysis" result shown by the dashboard.
//!
//! ## Responsibilities
//! - Define the pluggable [`EventSource`] randomness seam, with an `rand`-backed
//!   production source and a scripted source for deterministic tests.
//! - Provide [`Interval`], a clock-driven repeating timer with deterministic
//!   cancellation.
//! - Implement the progress, report and heat-map generators plus the
//!   reference image match simulator.
//!
//! ## Data flow
//! The dashboard runtime mounts generators when analysis starts and calls
//! `advance(now_ms, source)` on each of them; every due interval firing draws
//! from the event source and mutates only the generator that owns the timer.
//!
//! ## Ownership and lifetimes
//! Generators own their state and timers. The event source is borrowed
//! mutably per call, so one source can feed several generators in turn.
//!
//! ## Error model
//! Invalid timer periods and model validation failures surface as
//! [`SimError`].
//!
//! ## Example
//! ```rust
//! use neuro_sight_core::AnalysisType;
//! use neuro_sight_sim::{ProgressGenerator, ScriptedEventSource};
//!
//! let mut source = ScriptedEventSource::new(vec![0.5]);
//! let mut progress = ProgressGenerator::mount(AnalysisType::ObjectDetection, 0);
//! progress.advance(800, &mut source);
//! assert_eq!(progress.snapshot().progress, 1.5);
//! ```

mod heat_map;
mod image_match;
mod progress;
mod report;

use neuro_sight_core::CoreError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub use heat_map::{HEAT_MAP_INTERVAL_MS, HeatMapGenerator, REALTIME_DESCRIPTION};
pub use image_match::{
    IMAGE_MATCH_DELAY_MS, IMAGE_MATCH_PROBABILITY, ImageMatchSimulator, MatchStatus,
};
pub use progress::{
    COMPLETION_DELAY_MS, PHASES, PROGRESS_INTERVAL_MS, ProgressGenerator, ProgressSignal,
    ProgressSnapshot, ProgressStatus, ProgressStep,
};
pub use report::{
    INITIAL_ENTRY_DETAIL, REPORT_INTERVAL_MS, ReportGenerator, ReportTemplate, generate_entry,
    templates_for,
};

/// Largest value a scripted source will hand out.
const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

/// Source of uniformly distributed draws in `[0, 1)`.
///
/// Every simulated outcome is derived from [`EventSource::next_unit`], so a
/// scripted implementation fully determines generator behavior.
pub trait EventSource {
    /// Returns the next draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_unit() * (high - low)
    }

    /// Weighted coin that is `true` with `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }

    /// Uniform index in `0..len`; `0` for an empty range.
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let index = (self.next_unit() * len as f64) as usize;
        index.min(len - 1)
    }
}

impl<T: EventSource + ?Sized> EventSource for Box<T> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Production event source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomEventSource {
    rng: StdRng,
}

impl RandomEventSource {
    /// Seeds from the operating system.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeds deterministically for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EventSource for RandomEventSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Deterministic source that cycles through a fixed script.
///
/// Values are clamped into `[0, 1)`. An empty script always yields `0.0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEventSource {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedEventSource {
    /// Creates a source replaying `values` in order, wrapping at the end.
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|value| {
                if value.is_nan() {
                    0.0
                } else {
                    value.clamp(0.0, MAX_UNIT)
                }
            })
            .collect();
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws served so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl EventSource for ScriptedEventSource {
    fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        value
    }
}

/// Repeating timer driven by an external millisecond clock.
///
/// A cancelled interval never reports a due firing until restarted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl Interval {
    /// Creates a stopped interval.
    ///
    /// # Errors
    /// Returns [`SimError::InvalidInterval`] when `period_ms == 0`.
    pub fn new(period_ms: u64) -> Result<Self, SimError> {
        if period_ms == 0 {
            return Err(SimError::InvalidInterval);
        }
        Ok(Self {
            period_ms,
            next_due_ms: None,
        })
    }

    pub(crate) fn every(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_due_ms: None,
        }
    }

    /// Starts (or restarts) the interval; first firing is one period after `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
    }

    /// Stops the interval.
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    /// Returns `true` while started.
    pub fn is_active(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Timer period.
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Next scheduled firing, if active.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.next_due_ms
    }

    /// Consumes the next firing that is due at `now_ms` and returns its
    /// scheduled time.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<u64> {
        let due = self.next_due_ms?;
        if due > now_ms {
            return None;
        }
        self.next_due_ms = Some(due.saturating_add(self.period_ms));
        Some(due)
    }
}

/// Simulation error type.
#[derive(Debug, Error)]
pub enum SimError {
    /// Timer period must be positive.
    #[error("interval period must be greater than zero")]
    InvalidInterval,
    /// Generated value failed model validation.
    #[error("model error: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for randomness helpers and interval timing.

    use super::*;

    #[test]
    fn scripted_source_cycles_and_clamps() {
        let mut source = ScriptedEventSource::new(vec![0.25, 1.5, -1.0]);
        assert_eq!(source.next_unit(), 0.25);
        assert_eq!(source.next_unit(), MAX_UNIT);
        assert_eq!(source.next_unit(), 0.0);
        assert_eq!(source.next_unit(), 0.25);
        assert_eq!(source.draws(), 4);
    }

    #[test]
    fn pick_stays_in_range_at_upper_edge() {
        let mut source = ScriptedEventSource::constant(1.0);
        assert_eq!(source.pick(4), 3);
        assert_eq!(source.pick(0), 0);
    }

    #[test]
    fn chance_is_strictly_below_probability() {
        let mut source = ScriptedEventSource::new(vec![0.29, 0.3]);
        assert!(source.chance(0.3));
        assert!(!source.chance(0.3));
    }

    #[test]
    fn seeded_sources_repeat() {
        let mut left = RandomEventSource::seeded(7);
        let mut right = RandomEventSource::seeded(7);
        for _ in 0..16 {
            let value = left.next_unit();
            assert!((0.0..1.0).contains(&value));
            assert_eq!(value, right.next_unit());
        }
    }

    #[test]
    fn interval_fires_each_elapsed_period_once() {
        let mut interval = Interval::new(800).expect("period should be valid");
        assert_eq!(interval.pop_due(10_000), None);

        interval.start(0);
        assert_eq!(interval.pop_due(799), None);
        assert_eq!(interval.pop_due(1_700), Some(800));
        assert_eq!(interval.pop_due(1_700), Some(1_600));
        assert_eq!(interval.pop_due(1_700), None);

        interval.cancel();
        assert_eq!(interval.pop_due(100_000), None);
        assert!(Interval::new(0).is_err());
    }
}
