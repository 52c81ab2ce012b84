//! # Debounce Engine
//!
//! 尾沿防抖引擎。将密集的触发脉冲折叠为静默期结束后的单次动作执行。
//!
//! 负责：
//! - 维护每个实例唯一的待决静默期（后到的触发取消并重置前一个）
//! - 静默期满后异步执行动作，动作失败不中断后续触发
//! - 统计触发、重置、执行与丢弃计数
//!
//! ## 使用示例
//!
//! ```ignore
//! use std::time::Duration;
//!
//! use contracts::DebounceConfig;
//! use debounce_engine::{ClosureAction, DebounceHandle};
//!
//! let config = DebounceConfig::new("search_box", Duration::from_millis(100));
//! let action = ClosureAction::from_fn("search_box", || run_search());
//! let handle = DebounceHandle::spawn(action, config)?;
//!
//! // 密集调用只会在最后一次之后 100ms 执行一次
//! handle.trigger();
//! handle.trigger();
//! handle.trigger();
//!
//! handle.shutdown().await;
//! ```

mod actions;
mod handle;
mod metrics;
mod mock;
mod window;

// Re-exports
pub use actions::{ClosureAction, LogAction};
pub use handle::{debounce, DebounceBuilder, DebounceHandle};
pub use metrics::{DebounceMetrics, MetricsSnapshot};
pub use mock::{MockTriggerConfig, MockTriggerSource, Pulse};
pub use window::{QuietWindow, TriggerOutcome};

// Re-export contract types
pub use contracts::{Action, ActionFn, DebounceConfig, DebounceError, FireMeta};
