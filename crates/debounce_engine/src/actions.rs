//! Bundled actions - closure adapter and tracing logger

use std::sync::Arc;

use tracing::{debug, info, instrument};

use contracts::{Action, ActionFn, DebounceError};

/// Adapter that runs a plain callback as an `Action`
///
/// The callback is invoked with no arguments each time a quiet period
/// elapses; whatever context it needs must be captured at construction.
pub struct ClosureAction {
    name: String,
    action: ActionFn,
}

impl ClosureAction {
    /// Wrap a shared callback
    pub fn new(name: impl Into<String>, action: ActionFn) -> Self {
        Self {
            name: name.into(),
            action,
        }
    }

    /// Wrap a plain closure
    pub fn from_fn<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(name, Arc::new(f))
    }
}

impl Action for ClosureAction {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&mut self) -> Result<(), DebounceError> {
        (self.action)();
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DebounceError> {
        Ok(())
    }
}

/// Action that logs each firing for debugging
pub struct LogAction {
    name: String,
}

impl LogAction {
    /// Create a new LogAction with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Action for LogAction {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(name = "log_action_run", skip(self), fields(action = %self.name))]
    async fn run(&mut self) -> Result<(), DebounceError> {
        info!(action = %self.name, "Debounced action fired");
        Ok(())
    }

    #[instrument(name = "log_action_close", skip(self))]
    async fn close(&mut self) -> Result<(), DebounceError> {
        debug!(action = %self.name, "LogAction closed");
        Ok(())
    }
}
