//! Quick Debounce Demo
//!
//! Minimal usage of the `debounce` convenience function: wrap a closure,
//! call `trigger` in a burst, watch it run once.
//!
//! Run with: cargo run --bin quick_debounce

use std::sync::Arc;
use std::time::Duration;

use debounce_engine::debounce;
use tokio::time::sleep;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let handle = debounce(
        Arc::new(|| {
            tracing::info!("Draft saved");
        }),
        Duration::from_millis(200),
    )?;

    // A burst of edits closer together than the quiet period
    for i in 0..5 {
        tracing::info!(edit = i, "Keystroke");
        handle.trigger();
        sleep(Duration::from_millis(50)).await;
    }

    // The single save happens 200ms after the last keystroke
    sleep(Duration::from_millis(300)).await;

    handle.shutdown().await;
    Ok(())
}
