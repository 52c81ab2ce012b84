//! 防抖指标收集模块
//!
//! 基于 FireMeta 收集和统计防抖实例的运行指标。

use contracts::FireMeta;
use metrics::{counter, gauge, histogram};

/// 记录一次触发脉冲
///
/// 每次调用 `DebounceHandle::trigger` 被工作任务接收时记录。
pub fn record_trigger(action: &str) {
    counter!("debounce_triggers_total", "action" => action.to_string()).increment(1);
    gauge!("debounce_pending", "action" => action.to_string()).set(1.0);
}

/// 记录一次静默期重置（后到的触发取消了待决执行）
pub fn record_rearm(action: &str) {
    counter!("debounce_rearms_total", "action" => action.to_string()).increment(1);
}

/// 从 FireMeta 记录一次执行
///
/// 每次静默期满、动作成功运行后调用此函数来记录指标。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_fire;
///
/// if let Some(meta) = window.on_deadline(now) {
///     record_fire("search_box", &meta);
///     // ...
/// }
/// ```
pub fn record_fire(action: &str, meta: &FireMeta) {
    // 执行计数器
    counter!("debounce_fires_total", "action" => action.to_string()).increment(1);

    // 执行序号 (用于检测实例重建)
    gauge!("debounce_last_fire_seq", "action" => action.to_string()).set(meta.fire_seq as f64);

    // 本次执行折叠的触发数
    histogram!("debounce_collapsed_calls", "action" => action.to_string())
        .record(meta.collapsed_calls as f64);

    // 截止点到实际执行的滞后 (毫秒)
    histogram!("debounce_fire_lag_ms", "action" => action.to_string())
        .record(meta.fire_lag_ms());

    gauge!("debounce_pending", "action" => action.to_string()).set(0.0);
}

/// 记录触发队列满导致的脉冲丢弃
pub fn record_trigger_dropped(action: &str) {
    counter!("debounce_triggers_dropped_total", "action" => action.to_string()).increment(1);
}

/// 记录动作执行失败
pub fn record_action_failure(action: &str) {
    counter!("debounce_action_failures_total", "action" => action.to_string()).increment(1);
    gauge!("debounce_pending", "action" => action.to_string()).set(0.0);
}

/// 防抖统计聚合器
///
/// 在内存中聚合 FireMeta 流，便于统计和输出摘要。
#[derive(Debug, Clone, Default)]
pub struct DebounceStatsAggregator {
    /// 总执行次数
    pub total_fires: u64,

    /// 被折叠的触发总数（含最终导致执行的那一次）
    pub total_triggers: u64,

    /// 最近一次执行序号
    pub last_fire_seq: u64,

    /// 每次执行折叠触发数统计
    pub collapsed_stats: RunningStats,

    /// 执行滞后统计 (毫秒)
    pub lag_stats: RunningStats,
}

impl DebounceStatsAggregator {
    /// 创建新的聚合器
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新聚合统计
    pub fn update(&mut self, meta: &FireMeta) {
        self.total_fires += 1;
        self.total_triggers += meta.collapsed_calls as u64;
        self.last_fire_seq = meta.fire_seq;

        self.collapsed_stats.push(meta.collapsed_calls as f64);
        self.lag_stats.push(meta.fire_lag_ms());
    }

    /// 生成摘要报告
    pub fn summary(&self) -> DebounceSummary {
        let suppressed = self.total_triggers.saturating_sub(self.total_fires);

        DebounceSummary {
            total_fires: self.total_fires,
            total_triggers: self.total_triggers,
            suppressed_triggers: suppressed,
            suppression_rate: if self.total_triggers > 0 {
                suppressed as f64 / self.total_triggers as f64 * 100.0
            } else {
                0.0
            },
            collapsed_calls: StatsSummary::from(&self.collapsed_stats),
            fire_lag_ms: StatsSummary::from(&self.lag_stats),
        }
    }

    /// 重置统计
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 防抖摘要
#[derive(Debug, Clone, Default)]
pub struct DebounceSummary {
    pub total_fires: u64,
    pub total_triggers: u64,
    pub suppressed_triggers: u64,
    pub suppression_rate: f64,
    pub collapsed_calls: StatsSummary,
    pub fire_lag_ms: StatsSummary,
}

impl std::fmt::Display for DebounceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Debounce Summary ===")?;
        writeln!(f, "Firings: {}", self.total_fires)?;
        writeln!(f, "Triggers absorbed: {}", self.total_triggers)?;
        writeln!(
            f,
            "Suppressed triggers: {} ({:.2}%)",
            self.suppressed_triggers, self.suppression_rate
        )?;
        writeln!(f, "Collapsed calls per firing: {}", self.collapsed_calls)?;
        writeln!(f, "Fire lag (ms): {}", self.fire_lag_ms)?;

        Ok(())
    }
}

/// 统计摘要
#[derive(Debug, Clone, Default)]
pub struct StatsSummary {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl From<&RunningStats> for StatsSummary {
    fn from(stats: &RunningStats) -> Self {
        Self {
            count: stats.count(),
            min: stats.min(),
            max: stats.max(),
            mean: stats.mean(),
            std_dev: stats.std_dev(),
        }
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.count == 0 {
            write!(f, "N/A")
        } else {
            write!(
                f,
                "min={:.3}, max={:.3}, mean={:.3}, std={:.3} (n={})",
                self.min, self.max, self.mean, self.std_dev, self.count
            )
        }
    }
}

/// 在线统计计算器 (Welford's algorithm)
#[derive(Debug, Clone, Default)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl RunningStats {
    /// 添加新值
    pub fn push(&mut self, value: f64) {
        self.count += 1;

        if self.count == 1 {
            self.min = value;
            self.max = value;
            self.mean = value;
            self.m2 = 0.0;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);

            let delta = value - self.mean;
            self.mean += delta / self.count as f64;
            let delta2 = value - self.mean;
            self.m2 += delta * delta2;
        }
    }

    /// 样本数量
    pub fn count(&self) -> u64 {
        self.count
    }

    /// 均值
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// 方差
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// 标准差
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// 最小值
    pub fn min(&self) -> f64 {
        self.min
    }

    /// 最大值
    pub fn max(&self) -> f64 {
        self.max
    }
}
