//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Quiet periods are configured in milliseconds (f64) and converted to
//!   `Duration` at the engine boundary
//! - `fire_seq` orders firings per instance, for diagnostics

mod action;
mod config;
mod error;
mod fire;

pub use action::{Action, ActionFn, LocalAction};
pub use config::DebounceConfig;
pub use error::DebounceError;
pub use fire::FireMeta;
