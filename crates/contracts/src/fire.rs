//! FireMeta - debounce engine output
//!
//! Metadata describing one completed firing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Firing metadata
///
/// Produced by the engine each time a quiet period elapses and the action
/// runs. Carried to observers and metrics; never passed to the action, which
/// is always invoked with no arguments.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireMeta {
    /// Firing sequence number (monotonically increasing per instance)
    pub fire_seq: u64,

    /// Trigger calls collapsed into this firing (at least 1)
    pub collapsed_calls: u32,

    /// Configured quiet period
    pub delay: Duration,

    /// Scheduling lag: how late past the armed deadline the firing ran
    pub fire_lag: Duration,
}

impl FireMeta {
    /// Scheduling lag in milliseconds (for histogram emission)
    pub fn fire_lag_ms(&self) -> f64 {
        self.fire_lag.as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_round_trip() {
        let meta = FireMeta {
            fire_seq: 7,
            collapsed_calls: 3,
            delay: Duration::from_millis(100),
            fire_lag: Duration::from_micros(1500),
        };

        let json = serde_json::to_string(&meta).expect("serialize");
        let back: FireMeta = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(back.fire_seq, 7);
        assert_eq!(back.collapsed_calls, 3);
        assert_eq!(back.delay, Duration::from_millis(100));
        assert_eq!(back.fire_lag, Duration::from_micros(1500));
    }

    #[test]
    fn lag_converts_to_milliseconds() {
        let meta = FireMeta {
            fire_lag: Duration::from_micros(2500),
            ..FireMeta::default()
        };
        assert!((meta.fire_lag_ms() - 2.5).abs() < 1e-9);
    }
}
