//! Pond Monitoring Example
//!
//! Replays one minute and a half of sensor reports from a pond node and
//! shows what the monitor publishes along the way.
//!
//! ## What You'll Learn
//!
//! - Building a monitor from a JSON configuration
//! - Submitting full and two-parameter readings
//! - Polling the latest published state
//! - Classifying on the rolling average instead of a single sample
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_pond_monitoring
//! ```

use std::sync::Arc;

use aquaguard_core::{
    constants::{MS_PER_SECOND, SAMPLE_INTERVAL_MS, WINDOW_CAPACITY},
    FixedTime, MonitorConfig, MonitorService,
};

fn main() {
    println!("AquaGuard Pond Monitoring Example");
    println!("=================================\n");

    // Majority matching, plus an oxygen guess for nodes without a probe
    let config = match MonitorConfig::from_json_str(
        r#"{ "min_matches": 2, "default_dissolved_oxygen": 5.5 }"#,
    ) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Bad configuration: {}", e);
            return;
        }
    };

    let clock = Arc::new(FixedTime::new(1_700_000_000_000));
    let monitor = match MonitorService::from_config(&config, None) {
        Ok(monitor) => monitor.with_clock(clock.clone()),
        Err(e) => {
            eprintln!("Cannot build monitor: {}", e);
            return;
        }
    };

    // Morning warm-up with an afternoon oxygen sag, one report every 5 s
    let reports = [
        (26.1, 5.8, 7.1),
        (26.3, 5.6, 7.1),
        (26.8, 5.1, 7.2),
        (27.4, 4.4, 7.3),
        (28.2, 3.6, 7.4),
        (29.0, 2.9, 7.6),
        (29.9, 2.4, 7.8),
        (30.6, 2.1, 8.0),
        (31.3, 1.9, 8.2),
        (31.8, 1.8, 8.3),
        (32.4, 1.7, 8.6),
        (33.1, 1.6, 8.8),
        (33.6, 1.5, 9.1),
        (34.0, 1.5, 9.3),
    ];

    println!("Submitting {} reports (window holds {}):", reports.len(), WINDOW_CAPACITY);
    for (i, &(temperature, oxygen, ph)) in reports.iter().enumerate() {
        let elapsed_s = i as u64 * SAMPLE_INTERVAL_MS / MS_PER_SECOND;

        match monitor.submit_reading(temperature, oxygen, ph) {
            Ok(result) => println!(
                "  t+{:>3}s  {:>4.1}°C  DO {:>3.1} mg/L  pH {:>3.1}  ->  {:?}",
                elapsed_s,
                temperature,
                oxygen,
                ph,
                result.species()
            ),
            Err(e) => println!("  t+{:>3}s  rejected: {}", elapsed_s, e),
        }

        clock.advance(SAMPLE_INTERVAL_MS);
    }

    // A probe glitch is rejected and leaves the published state alone
    println!("\nSubmitting a NaN temperature:");
    if let Err(e) = monitor.submit_reading(f32::NAN, 5.0, 7.0) {
        println!("  rejected: {}", e);
    }

    // Node without an oxygen probe
    println!("\nTwo-parameter update (DO assumed {} mg/L):", monitor.default_dissolved_oxygen());
    match monitor.submit_simple(28.0, 7.2) {
        Ok(result) => println!("  -> {:?}", result.species()),
        Err(e) => println!("  rejected: {}", e),
    }

    let state = monitor.current_state();
    println!("\nLatest published state:");
    if let Some(reading) = state.last_reading {
        println!("  recorded at {}", reading.recorded_at().unwrap_or_default());
    }
    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("  cannot render: {}", e),
    }

    println!("\nClassification on the rolling average:");
    match monitor.classify_on_average() {
        Ok(summary) => {
            let avg = summary.average.rounded();
            println!(
                "  over {} readings: {}°C  DO {} mg/L  pH {}  ->  {:?}",
                summary.sample_count,
                avg.temperature,
                avg.dissolved_oxygen,
                avg.ph,
                summary.result.species()
            );
        }
        Err(e) => println!("  unavailable: {}", e),
    }
}
