//! Debounce configuration contracts that can be shared across crates.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::DebounceError;

/// Debouncer instance configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Instance name (used for logging/metrics labels)
    #[serde(default = "default_name")]
    pub name: String,

    /// Quiet period in milliseconds
    ///
    /// The action fires once this long has elapsed with no new triggers.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: f64,

    /// Trigger queue capacity between callers and the worker
    #[serde(default = "default_trigger_capacity")]
    pub trigger_capacity: usize,
}

fn default_name() -> String {
    "debounce".to_string()
}

fn default_delay_ms() -> f64 {
    100.0
}

fn default_trigger_capacity() -> usize {
    64
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            delay_ms: default_delay_ms(),
            trigger_capacity: default_trigger_capacity(),
        }
    }
}

impl DebounceConfig {
    /// Create a configuration with an explicit name and quiet period
    pub fn new(name: impl Into<String>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            delay_ms: delay.as_secs_f64() * 1000.0,
            ..Self::default()
        }
    }

    /// Validate configuration legality
    ///
    /// Malformed values are a caller error and fail here, at construction
    /// time, rather than being clamped.
    ///
    /// # Errors
    /// Returns the first violation found as `ConfigValidation`.
    pub fn validate(&self) -> Result<(), DebounceError> {
        if self.name.is_empty() {
            return Err(DebounceError::config_validation(
                "name",
                "must not be empty",
            ));
        }

        if !self.delay_ms.is_finite() {
            return Err(DebounceError::config_validation(
                "delay_ms",
                format!("must be a finite number, got {}", self.delay_ms),
            ));
        }

        if self.delay_ms < 0.0 {
            return Err(DebounceError::config_validation(
                "delay_ms",
                format!("must be non-negative, got {}", self.delay_ms),
            ));
        }

        if Duration::try_from_secs_f64(self.delay_ms / 1000.0).is_err() {
            return Err(DebounceError::config_validation(
                "delay_ms",
                format!("must fit in a duration, got {}", self.delay_ms),
            ));
        }

        if self.trigger_capacity == 0 {
            return Err(DebounceError::config_validation(
                "trigger_capacity",
                "must be at least 1",
            ));
        }

        Ok(())
    }

    /// Quiet period as a `Duration`
    ///
    /// Values that `validate` rejects (negative, non-finite, oversized)
    /// saturate to `Duration::MAX` here, never to zero; every construction
    /// path validates first.
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_ms / 1000.0).unwrap_or(Duration::MAX)
    }
}
