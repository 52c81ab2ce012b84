//! Layered error definitions
//!
//! Categorized by source: config / trigger / action

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum DebounceError {
    // ===== Configuration Errors =====
    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Trigger Errors =====
    /// Trigger queue overflow
    #[error("trigger queue full for '{name}': capacity={capacity}")]
    TriggerQueueFull { name: String, capacity: usize },

    /// Worker task is gone
    #[error("debounce worker for '{name}' has stopped")]
    WorkerStopped { name: String },

    // ===== Action Errors =====
    /// Action execution error
    #[error("action '{name}' failed: {message}")]
    ActionFailed {
        name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DebounceError {
    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create action execution error
    pub fn action_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ActionFailed {
            name: name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create worker-stopped error
    pub fn worker_stopped(name: impl Into<String>) -> Self {
        Self::WorkerStopped { name: name.into() }
    }
}
