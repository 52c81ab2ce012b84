//! Burst Pipeline Demo
//!
//! Demonstrates the full debounce pipeline without any real event source:
//! MockTriggerSource -> DebounceHandle -> stats aggregation.
//!
//! Run with: cargo run --bin burst_pipeline

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use contracts::DebounceConfig;
use debounce_engine::{ClosureAction, DebounceBuilder, MockTriggerSource};
use observability::DebounceStatsAggregator;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    tracing::info!("Starting Burst Pipeline Demo");

    // ==== Stage 1: Create mock trigger source ====
    let source = MockTriggerSource::bursty("keystrokes", 8, 25.0, 600.0, 4);
    tracing::info!("Mock trigger source created (4 bursts of 8 pulses)");

    // ==== Stage 2: Spawn the debounced action ====
    let fire_count = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&fire_count);

    let (meta_tx, mut meta_rx) = mpsc::channel(32);

    let config = DebounceConfig {
        name: "search_refresh".to_string(),
        delay_ms: 150.0,
        ..Default::default()
    };

    let handle = DebounceBuilder::from_config(config)
        .observer(meta_tx)
        .spawn(ClosureAction::from_fn("search_refresh", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::info!(firing = n, "Search refresh executed");
        }))?;

    // ==== Stage 3: Forward pulses into the debounced handle ====
    let mut pulse_rx = source.start(64);

    let forward_handle = tokio::spawn(async move {
        let mut forwarded = 0u64;
        while let Some(pulse) = pulse_rx.recv().await {
            tracing::debug!(seq = pulse.seq, burst = pulse.burst, "Forwarding pulse");
            if handle.trigger() {
                forwarded += 1;
            }
        }
        (handle, forwarded)
    });

    // ==== Stage 4: Collect firing stats from the observer stream ====
    let stats_handle = tokio::spawn(async move {
        let mut aggregator = DebounceStatsAggregator::new();
        while let Some(meta) = meta_rx.recv().await {
            tracing::info!(
                fire_seq = meta.fire_seq,
                collapsed_calls = meta.collapsed_calls,
                fire_lag_ms = format!("{:.3}", meta.fire_lag_ms()),
                "Firing observed"
            );
            aggregator.update(&meta);
        }
        aggregator
    });

    // ==== Stage 5: Wait for the source to finish ====
    let result = tokio::time::timeout(Duration::from_secs(30), forward_handle).await;
    source.stop();

    let (handle, forwarded) = match result {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => return Err(format!("Forward task failed: {e:?}").into()),
        Err(_) => return Err("Pipeline timed out".into()),
    };

    tracing::info!(forwarded, "All pulses forwarded");

    // ==== Stage 6: Shutdown and report ====
    tracing::info!("Shutting down...");
    let metrics = Arc::clone(handle.metrics());
    handle.shutdown().await;

    let aggregator = tokio::time::timeout(Duration::from_secs(2), stats_handle).await??;

    let snapshot = metrics.snapshot();
    tracing::info!(
        triggers = snapshot.trigger_count,
        rearms = snapshot.rearm_count,
        fires = snapshot.fire_count,
        dropped = snapshot.dropped_count,
        "Pipeline complete"
    );

    println!("{}", aggregator.summary());

    Ok(())
}
