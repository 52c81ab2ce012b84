//! QuietWindow - pure trailing-edge debounce state

use std::time::Duration;

use tokio::time::Instant;

use contracts::FireMeta;

/// Outcome of applying one trigger to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// No timer was pending; a quiet period was armed
    Armed,
    /// The pending timer was canceled and the quiet period restarted
    Rearmed,
}

/// Pure debounce state machine
///
/// Holds the single pending deadline for one debounced instance. Every
/// trigger replaces it with `trigger time + delay`; the window fires only
/// when the clock passes the deadline with no intervening trigger. The async
/// worker supplies clock readings; this type never touches the runtime.
#[derive(Debug)]
pub struct QuietWindow {
    /// Quiet period length
    delay: Duration,
    /// The one pending deadline, if armed
    deadline: Option<Instant>,
    /// Trigger calls collapsed into the currently pending firing
    collapsed_calls: u32,
    /// Completed firings
    fire_seq: u64,
    /// Pending timers canceled by re-triggering, over the instance lifetime
    rearm_count: u64,
}

impl QuietWindow {
    /// Create a disarmed window with the given quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            collapsed_calls: 0,
            fire_seq: 0,
            rearm_count: 0,
        }
    }

    /// Apply one trigger observed at `at`
    ///
    /// Cancels the pending deadline, if any, and schedules a new one at
    /// `at + delay`.
    pub fn on_trigger(&mut self, at: Instant) -> TriggerOutcome {
        let outcome = if self.deadline.is_some() {
            self.rearm_count += 1;
            TriggerOutcome::Rearmed
        } else {
            TriggerOutcome::Armed
        };

        self.deadline = Some(at + self.delay);
        self.collapsed_calls = self.collapsed_calls.saturating_add(1);
        outcome
    }

    /// Observe the clock at `now` and fire if the deadline has passed
    ///
    /// Clears the pending deadline and returns firing metadata when due;
    /// `None` while disarmed or while the quiet period is still running.
    pub fn on_deadline(&mut self, now: Instant) -> Option<FireMeta> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        self.deadline = None;
        self.fire_seq += 1;

        let collapsed_calls = self.collapsed_calls;
        self.collapsed_calls = 0;

        Some(FireMeta {
            fire_seq: self.fire_seq,
            collapsed_calls,
            delay: self.delay,
            fire_lag: now.duration_since(deadline),
        })
    }

    /// The pending deadline, if a quiet period is armed
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a firing is currently scheduled
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Configured quiet period
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Completed firings so far
    #[inline]
    pub fn fire_count(&self) -> u64 {
        self.fire_seq
    }

    /// Timers canceled by re-triggering so far
    #[inline]
    pub fn rearm_count(&self) -> u64 {
        self.rearm_count
    }
}
