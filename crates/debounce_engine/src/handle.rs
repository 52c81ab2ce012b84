//! DebounceHandle - one debounced instance: trigger queue + worker task

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, instrument, warn};

use contracts::{Action, ActionFn, DebounceConfig, DebounceError, FireMeta};

use crate::actions::ClosureAction;
use crate::metrics::DebounceMetrics;
use crate::window::{QuietWindow, TriggerOutcome};

/// One timestamped trigger pulse
///
/// Carries the clock reading from the call site so the quiet period is
/// measured from the call, not from worker receipt.
#[derive(Debug, Clone, Copy)]
struct Trigger {
    at: Instant,
    seq: u64,
}

/// Handle to a running debounced action
///
/// `trigger` is the debounced call: it cancels the worker's pending firing
/// and schedules a new one `delay` later. The action runs on the worker
/// task, never inline with the trigger call, and nothing is propagated back
/// to callers.
#[derive(Debug)]
pub struct DebounceHandle {
    /// Instance name
    name: String,
    /// Configured quiet period
    delay: Duration,
    /// Channel to send trigger pulses to the worker
    tx: mpsc::Sender<Trigger>,
    /// Call sequence numbering (diagnostics)
    trigger_seq: AtomicU64,
    /// Shared metrics
    metrics: Arc<DebounceMetrics>,
    /// Worker task handle
    worker_handle: JoinHandle<()>,
}

impl DebounceHandle {
    /// Validate `config` and spawn the worker task for `action`
    ///
    /// # Errors
    /// Fails fast on malformed configuration (negative, non-finite, or
    /// oversized delay, empty name, zero capacity); nothing is spawned in
    /// that case.
    pub fn spawn<A: Action + Send + 'static>(
        action: A,
        config: DebounceConfig,
    ) -> Result<Self, DebounceError> {
        Self::spawn_with_observer(action, config, None)
    }

    fn spawn_with_observer<A: Action + Send + 'static>(
        action: A,
        config: DebounceConfig,
        observer: Option<mpsc::Sender<FireMeta>>,
    ) -> Result<Self, DebounceError> {
        config.validate()?;

        let name = config.name.clone();
        let delay = config.delay();
        let (tx, rx) = mpsc::channel(config.trigger_capacity);
        let metrics = Arc::new(DebounceMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();
        let window = QuietWindow::new(delay);

        let worker_handle = tokio::spawn(async move {
            debounce_worker(action, rx, window, worker_metrics, observer, worker_name).await;
        });

        info!(
            action = %name,
            delay_ms = config.delay_ms,
            trigger_capacity = config.trigger_capacity,
            "Debounce instance spawned"
        );

        Ok(Self {
            name,
            delay,
            tx,
            trigger_seq: AtomicU64::new(0),
            metrics,
            worker_handle,
        })
    }

    /// Get instance name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get configured quiet period
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<DebounceMetrics> {
        &self.metrics
    }

    /// Whether a firing is currently scheduled (worker-side approximation)
    pub fn is_pending(&self) -> bool {
        self.metrics.pending()
    }

    /// Debounced call (non-blocking)
    ///
    /// Cancels the pending firing, if any, and schedules a new one for
    /// `delay` from now. Arguments are never forwarded to the action; any
    /// context it needs must already live inside it.
    ///
    /// Returns true if the pulse was accepted, false if it was dropped
    /// (queue full) or the worker is gone.
    pub fn trigger(&self) -> bool {
        self.try_trigger().is_ok()
    }

    /// Debounced call that reports why a pulse was not accepted
    ///
    /// Same semantics as `trigger`, with the rejection reason surfaced for
    /// callers that want to react to backpressure or a dead worker.
    ///
    /// # Errors
    /// `TriggerQueueFull` when the queue is at capacity, `WorkerStopped`
    /// when the worker task is gone.
    pub fn try_trigger(&self) -> Result<(), DebounceError> {
        let pulse = Trigger {
            at: Instant::now(),
            seq: self.trigger_seq.fetch_add(1, Ordering::Relaxed),
        };

        match self.tx.try_send(pulse) {
            Ok(()) => {
                // Update queue length approximation
                self.metrics
                    .set_queue_len(self.tx.max_capacity() - self.tx.capacity());
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(p)) => {
                self.metrics.inc_dropped_count();
                observability::record_trigger_dropped(&self.name);
                warn!(
                    action = %self.name,
                    trigger_seq = p.seq,
                    "Trigger queue full, pulse dropped"
                );
                Err(DebounceError::TriggerQueueFull {
                    name: self.name.clone(),
                    capacity: self.tx.max_capacity(),
                })
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(action = %self.name, "Debounce worker closed unexpectedly");
                Err(DebounceError::worker_stopped(&self.name))
            }
        }
    }

    /// Shutdown the worker gracefully
    ///
    /// Queued triggers are still applied, and a pending quiet period is
    /// completed rather than discarded: the worker sleeps out the armed
    /// deadline, fires, closes the action, then exits.
    #[instrument(name = "debounce_handle_shutdown", skip(self))]
    pub async fn shutdown(self) {
        // Drop sender to signal worker to stop
        drop(self.tx);
        // Wait for worker to finish
        if let Err(e) = self.worker_handle.await {
            error!(action = %self.name, error = ?e, "Worker task panicked");
        }
        debug!(action = %self.name, "DebounceHandle shutdown complete");
    }
}

/// Builder for a debounced instance with non-default wiring
///
/// # Example
///
/// ```ignore
/// let (meta_tx, meta_rx) = mpsc::channel(16);
/// let handle = DebounceBuilder::new("search")
///     .delay(Duration::from_millis(250))
///     .trigger_capacity(128)
///     .observer(meta_tx)
///     .spawn(ClosureAction::from_fn("search", || refresh_results()))?;
/// ```
pub struct DebounceBuilder {
    config: DebounceConfig,
    observer: Option<mpsc::Sender<FireMeta>>,
}

impl DebounceBuilder {
    /// Start from defaults with an explicit instance name
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(DebounceConfig {
            name: name.into(),
            ..DebounceConfig::default()
        })
    }

    /// Start from an existing configuration
    pub fn from_config(config: DebounceConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Set the quiet period
    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay_ms = delay.as_secs_f64() * 1000.0;
        self
    }

    /// Set the quiet period in raw milliseconds (validated at spawn)
    pub fn delay_ms(mut self, delay_ms: f64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Set the trigger queue capacity
    pub fn trigger_capacity(mut self, capacity: usize) -> Self {
        self.config.trigger_capacity = capacity;
        self
    }

    /// Receive `FireMeta` after each firing
    ///
    /// Delivery is non-blocking: a lagging observer misses entries instead
    /// of stalling the worker.
    pub fn observer(mut self, tx: mpsc::Sender<FireMeta>) -> Self {
        self.observer = Some(tx);
        self
    }

    /// Validate the configuration and spawn the worker
    ///
    /// # Errors
    /// Fails fast on malformed configuration.
    pub fn spawn<A: Action + Send + 'static>(
        self,
        action: A,
    ) -> Result<DebounceHandle, DebounceError> {
        DebounceHandle::spawn_with_observer(action, self.config, self.observer)
    }
}

/// Wrap a callback in a debounced instance with default wiring
///
/// Bursts of `trigger` calls closer together than `delay` collapse into a
/// single invocation of `action`, `delay` after the last call in the burst.
/// The action always runs with no arguments, asynchronously relative to the
/// trigger call; its result is not propagated back.
///
/// # Errors
/// Fails fast on malformed configuration.
///
/// # Example
///
/// ```ignore
/// let handle = debounce(Arc::new(|| save_draft()), Duration::from_millis(100))?;
/// handle.trigger();
/// ```
pub fn debounce(action: ActionFn, delay: Duration) -> Result<DebounceHandle, DebounceError> {
    let config = DebounceConfig::new("debounce", delay);
    DebounceHandle::spawn(ClosureAction::new(config.name.clone(), action), config)
}

/// Worker task that owns the quiet window and runs the action
#[instrument(
    name = "debounce_worker_loop",
    skip(action, rx, window, metrics, observer),
    fields(action = %name)
)]
async fn debounce_worker<A: Action>(
    mut action: A,
    mut rx: mpsc::Receiver<Trigger>,
    mut window: QuietWindow,
    metrics: Arc<DebounceMetrics>,
    observer: Option<mpsc::Sender<FireMeta>>,
    name: String,
) {
    debug!(action = %name, "Debounce worker started");

    loop {
        let received = match window.deadline() {
            Some(deadline) => {
                tokio::select! {
                    // An elapsed deadline fires before later triggers drain
                    biased;
                    _ = sleep_until(deadline) => {
                        if let Some(meta) = window.on_deadline(Instant::now()) {
                            run_fire(&mut action, meta, &metrics, observer.as_ref(), &name).await;
                        }
                        continue;
                    }
                    received = rx.recv() => received,
                }
            }
            None => rx.recv().await,
        };

        let Some(pulse) = received else {
            break;
        };

        metrics.set_queue_len(rx.len());
        metrics.inc_trigger_count();
        observability::record_trigger(&name);

        match window.on_trigger(pulse.at) {
            TriggerOutcome::Armed => {
                metrics.set_pending(true);
                debug!(action = %name, trigger_seq = pulse.seq, "Quiet period armed");
            }
            TriggerOutcome::Rearmed => {
                metrics.inc_rearm_count();
                observability::record_rearm(&name);
                debug!(
                    action = %name,
                    trigger_seq = pulse.seq,
                    "Pending firing canceled, quiet period restarted"
                );
            }
        }
    }

    // Graceful drain: complete the pending quiet period instead of discarding it
    if let Some(deadline) = window.deadline() {
        debug!(action = %name, "Completing pending firing before shutdown");
        sleep_until(deadline).await;
        if let Some(meta) = window.on_deadline(Instant::now()) {
            run_fire(&mut action, meta, &metrics, observer.as_ref(), &name).await;
        }
    }

    if let Err(e) = action.close().await {
        error!(action = %name, error = %e, "Close failed on shutdown");
    }

    debug!(action = %name, "Debounce worker stopped");
}

/// Run the action once for an elapsed quiet period and record the firing
async fn run_fire<A: Action>(
    action: &mut A,
    meta: FireMeta,
    metrics: &DebounceMetrics,
    observer: Option<&mpsc::Sender<FireMeta>>,
    name: &str,
) {
    metrics.set_pending(false);

    match action.run().await {
        Ok(()) => {
            metrics.inc_fire_count();
            observability::record_fire(name, &meta);
            debug!(
                action = %name,
                fire_seq = meta.fire_seq,
                collapsed_calls = meta.collapsed_calls,
                fire_lag_us = meta.fire_lag.as_micros() as u64,
                "Action fired"
            );
        }
        Err(e) => {
            metrics.inc_failure_count();
            observability::record_action_failure(name);
            error!(
                action = %name,
                fire_seq = meta.fire_seq,
                error = %e,
                "Action failed"
            );
            // Continue serving triggers - a failed run does not stop the worker
        }
    }

    if let Some(tx) = observer {
        let _ = tx.try_send(meta);
    }
}
