#![warn(missing_docs)]
//! # neuro-sight binary
//!
//! Headless entry point: runs one simulated analysis on a virtual clock and
//! writes the text report.

use neuro_sight_app::{DashboardConfig, app_version, run_demo};
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// CLI entry point.
fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "neuro_sight=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("neuro-sight {}", app_version());

    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("invalid configuration: {error}");
            std::process::exit(2);
        }
    };

    let start_ms = u64::try_from(OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000)
        .unwrap_or_default();

    match run_demo(&config, start_ms) {
        Ok(outcome) if outcome.redirected_to_login => {
            println!(
                "sign-in required: redirected to {}",
                neuro_sight_auth::LOGIN_ROUTE
            );
        }
        Ok(outcome) => {
            println!(
                "analysis={} state={:?} events={} elapsed={}s",
                config.analysis_type,
                outcome.final_state,
                outcome.total_events,
                outcome.elapsed_ms / 1_000
            );
            if let Some(path) = outcome.report_path {
                println!("report written to {}", path.display());
            }
        }
        Err(error) => {
            eprintln!("neuro-sight failed: {error}");
            std::process::exit(1);
        }
    }
}
