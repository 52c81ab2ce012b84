//! Action trait - debounced work interface
//!
//! Defines the abstract interface for the work a debouncer defers, decoupling
//! the engine from concrete action implementations.

use std::sync::Arc;

use crate::DebounceError;

/// Plain callback form of an action
///
/// The simplest way to hand work to a debouncer. Uses `Arc` so the same
/// callback can be shared across multiple contexts.
pub type ActionFn = Arc<dyn Fn() + Send + Sync>;

/// Deferred action trait
///
/// All action implementations must implement this trait. `run` is invoked
/// with no arguments: call-site arguments to the debounced invocable are
/// never forwarded, so any context the action needs must be captured in the
/// implementation before it is handed to the engine.
///
/// # Example
///
/// ```ignore
/// struct Reindex { index: SearchIndex }
///
/// impl Action for Reindex {
///     fn name(&self) -> &str { "reindex" }
///     async fn run(&mut self) -> Result<(), DebounceError> {
///         self.index.rebuild().await
///     }
///     async fn close(&mut self) -> Result<(), DebounceError> { Ok(()) }
/// }
/// ```
#[trait_variant::make(Action: Send)]
pub trait LocalAction {
    /// Action name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Execute the deferred work, once per elapsed quiet period
    ///
    /// # Errors
    /// Returns execution error (should include context). A returned error is
    /// recorded by the engine and does not stop the worker; a panic does.
    async fn run(&mut self) -> Result<(), DebounceError>;

    /// Release resources when the owning worker shuts down
    async fn close(&mut self) -> Result<(), DebounceError>;
}
