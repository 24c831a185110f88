//! Benchmark smoke test for the simulated analysis loop and report export.

use std::time::Instant;

use neuro_sight_core::AnalysisType;
use neuro_sight_report::ReportDocument;
use neuro_sight_sim::{
    HeatMapGenerator, ProgressGenerator, ProgressSignal, RandomEventSource, ReportGenerator,
};

const STEP_MS: u64 = 100;
const RUNS: u64 = 200;

#[test]
fn benchmark_simulation_smoke_prints_latency() {
    let start = Instant::now();
    let mut exported_bytes = 0usize;
    let mut logged_events = 0usize;

    for run in 0..RUNS {
        let mut source = RandomEventSource::seeded(run);
        let analysis_type = AnalysisType::ALL[(run % 4) as usize];
        let mut progress = ProgressGenerator::mount(analysis_type, 0);
        let mut report = ReportGenerator::mount(analysis_type, 0, true);
        let mut heat_map = HeatMapGenerator::new(0);
        heat_map.set_active(true, 0);

        let mut now = 0;
        loop {
            now += STEP_MS;
            let signal = progress.advance(now, &mut source);
            report.advance(now, &mut source);
            heat_map
                .advance(now, &mut source)
                .expect("heat map point should be valid");
            if signal == Some(ProgressSignal::Completed) {
                break;
            }
        }

        let document = ReportDocument::new(analysis_type, 0, now, report.entries())
            .expect("document should build");
        exported_bytes += document.export().body.len();
        logged_events += document.total_events();
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_simulation_elapsed_ms={elapsed_ms}");
    println!("benchmark_simulation_events={logged_events}");
    println!("benchmark_simulation_export_bytes={exported_bytes}");

    // Lightweight guardrail; strict timing checks are environment-specific.
    assert!(
        elapsed_ms < 5_000,
        "simulation smoke benchmark should stay bounded"
    );
}
