//! Simulated threat heat map.

use neuro_sight_core::{Severity, ThreatBuffer, ThreatPoint};

use crate::{EventSource, Interval, SimError};

/// Period of the heat-map timer.
pub const HEAT_MAP_INTERVAL_MS: u64 = 3_000;

/// Description attached to every generated point.
pub const REALTIME_DESCRIPTION: &str = "Real-time detection";

const X_RANGE: (f64, f64) = (10.0, 90.0);
const Y_RANGE: (f64, f64) = (20.0, 80.0);
const GENERATED_SEVERITIES: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

/// Rolling heat map fed by a 3 s timer while analysis runs.
#[derive(Debug, Clone)]
pub struct HeatMapGenerator {
    buffer: ThreatBuffer,
    interval: Interval,
    last_detection_ms: u64,
}

impl HeatMapGenerator {
    /// Creates an inactive heat map holding the idle-display seed points.
    pub fn new(now_ms: u64) -> Self {
        Self::with_buffer(ThreatBuffer::with_seed_points(now_ms), now_ms)
    }

    /// Creates an inactive heat map over a caller-provided buffer.
    pub fn with_buffer(buffer: ThreatBuffer, now_ms: u64) -> Self {
        Self {
            buffer,
            interval: Interval::every(HEAT_MAP_INTERVAL_MS),
            last_detection_ms: now_ms,
        }
    }

    /// Starts or cancels the timer. Re-activating an active map is a no-op.
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

    /// Adds one point per firing due at `now_ms`; returns how many.
    ///
    /// # Errors
    /// Returns [`SimError::Core`] if a generated point fails validation.
    pub fn advance(&mut self, now_ms: u64, source: &mut dyn EventSource) -> Result<usize, SimError> {
        let mut added = 0;
        while let Some(fired_at) = self.interval.pop_due(now_ms) {
            let point = generate_point(source, fired_at)?;
            self.buffer.push(point);
            self.last_detection_ms = fired_at;
            added += 1;
        }
        Ok(added)
    }

    /// Buffered points.
    pub fn buffer(&self) -> &ThreatBuffer {
        &self.buffer
    }

    /// Time of the most recent generated point (or creation time).
    pub fn last_detection_ms(&self) -> u64 {
        self.last_detection_ms
    }
}

/// Draws one point stamped at `now_ms`.
///
/// Draw order: x, y, severity.
pub(crate) fn generate_point(
    source: &mut dyn EventSource,
    now_ms: u64,
) -> Result<ThreatPoint, SimError> {
    let x = source.uniform(X_RANGE.0, X_RANGE.1);
    let y = source.uniform(Y_RANGE.0, Y_RANGE.1);
    let severity = GENERATED_SEVERITIES[source.pick(GENERATED_SEVERITIES.len())];

    ThreatPoint::new(
        now_ms.to_string(),
        x,
        y,
        severity,
        now_ms,
        REALTIME_DESCRIPTION,
    )
    .map_err(SimError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RandomEventSource, ScriptedEventSource};

    #[test]
    fn generated_points_stay_inside_the_zone() {
        let mut source = RandomEventSource::seeded(3);
        for tick in 0..200 {
            let point = generate_point(&mut source, tick).expect("point should be valid");
            assert!((10.0..90.0).contains(&point.x));
            assert!((20.0..80.0).contains(&point.y));
            assert_ne!(point.severity, Severity::Critical);
        }
    }

    #[test]
    fn scripted_draws_map_to_position_and_severity() {
        let mut source = ScriptedEventSource::new(vec![0.0, 0.5, 0.7]);
        let point = generate_point(&mut source, 9_000).expect("point should be valid");
        assert_eq!(point.x, 10.0);
        assert_eq!(point.y, 50.0);
        assert_eq!(point.severity, Severity::High);
        assert_eq!(point.id, "9000");
        assert_eq!(point.description, REALTIME_DESCRIPTION);
    }

    #[test]
    fn inactive_map_keeps_seed_points() {
        let mut source = ScriptedEventSource::constant(0.5);
        let mut map = HeatMapGenerator::new(600_000);
        assert_eq!(map.advance(700_000, &mut source).expect("advance"), 0);
        assert_eq!(map.buffer().len(), 3);

        map.set_active(true, 700_000);
        assert_eq!(map.advance(709_000, &mut source).expect("advance"), 3);
        assert_eq!(map.buffer().len(), 5);
        assert_eq!(map.last_detection_ms(), 709_000);
        assert_eq!(map.buffer().points().next().map(|p| p.id.as_str()), Some("2"));
    }
}
