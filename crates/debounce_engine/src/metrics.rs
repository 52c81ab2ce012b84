//! Per-instance debounce metrics for observability

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

/// Metrics for a single debounced instance
#[derive(Debug, Default)]
pub struct DebounceMetrics {
    /// Current trigger queue length
    queue_len: AtomicUsize,
    /// Total triggers received by the worker
    trigger_count: AtomicU64,
    /// Total pending timers canceled by re-triggering
    rearm_count: AtomicU64,
    /// Total completed firings (action ran successfully)
    fire_count: AtomicU64,
    /// Total action run failures
    failure_count: AtomicU64,
    /// Total triggers dropped due to full queue
    dropped_count: AtomicU64,
    /// Whether a firing is currently scheduled (approximation)
    pending: AtomicBool,
}

impl DebounceMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current queue length
    pub fn queue_len(&self) -> usize {
        self.queue_len.load(Ordering::Relaxed)
    }

    /// Set current queue length
    pub fn set_queue_len(&self, len: usize) {
        self.queue_len.store(len, Ordering::Relaxed);
    }

    /// Get total triggers received
    pub fn trigger_count(&self) -> u64 {
        self.trigger_count.load(Ordering::Relaxed)
    }

    /// Increment trigger count
    pub fn inc_trigger_count(&self) {
        self.trigger_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get rearm count
    pub fn rearm_count(&self) -> u64 {
        self.rearm_count.load(Ordering::Relaxed)
    }

    /// Increment rearm count
    pub fn inc_rearm_count(&self) {
        self.rearm_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get completed firing count
    pub fn fire_count(&self) -> u64 {
        self.fire_count.load(Ordering::Relaxed)
    }

    /// Increment firing count
    pub fn inc_fire_count(&self) {
        self.fire_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get action failure count
    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    /// Increment action failure count
    pub fn inc_failure_count(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get dropped trigger count
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    /// Increment dropped trigger count
    pub fn inc_dropped_count(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Whether a firing is currently scheduled
    pub fn pending(&self) -> bool {
        self.pending.load(Ordering::Relaxed)
    }

    /// Record whether a firing is scheduled
    pub fn set_pending(&self, pending: bool) {
        self.pending.store(pending, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queue_len: self.queue_len(),
            trigger_count: self.trigger_count(),
            rearm_count: self.rearm_count(),
            fire_count: self.fire_count(),
            failure_count: self.failure_count(),
            dropped_count: self.dropped_count(),
            pending: self.pending(),
        }
    }
}

/// Snapshot of debounce metrics (for reporting)
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub queue_len: usize,
    pub trigger_count: u64,
    pub rearm_count: u64,
    pub fire_count: u64,
    pub failure_count: u64,
    pub dropped_count: u64,
    pub pending: bool,
}
