//! Tests FIFO eviction of the heat-map rolling buffer.

use neuro_sight_core::{HEAT_MAP_CAPACITY, Severity, ThreatBuffer, ThreatPoint};

fn point(id: usize, severity: Severity) -> ThreatPoint {
    ThreatPoint::new(id.to_string(), 50.0, 50.0, severity, id as u64, "Real-time detection")
        .expect("point should be valid")
}

#[test]
fn threat_buffer_eviction_tests_drops_oldest_on_sixth_point() {
    let mut buffer = ThreatBuffer::new(HEAT_MAP_CAPACITY).expect("capacity should be valid");
    for id in 0..HEAT_MAP_CAPACITY {
        assert!(buffer.push(point(id, Severity::Low)).is_none());
    }

    let evicted = buffer.push(point(5, Severity::Low)).expect("sixth push should evict");
    assert_eq!(evicted.id, "0");
    assert_eq!(buffer.len(), HEAT_MAP_CAPACITY);

    let ids: Vec<_> = buffer.points().map(|point| point.id.clone()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn threat_buffer_eviction_tests_ignores_severity() {
    let mut buffer = ThreatBuffer::new(2).expect("capacity should be valid");
    buffer.push(point(0, Severity::Critical));
    buffer.push(point(1, Severity::Low));

    let evicted = buffer.push(point(2, Severity::Low)).expect("push should evict");
    assert_eq!(evicted.severity, Severity::Critical);
}

#[test]
fn threat_buffer_eviction_tests_rejects_zero_capacity() {
    assert!(ThreatBuffer::new(0).is_err());
}
