//! Mock 触发源
//!
//! 用于无真实事件流环境的测试。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

/// 触发脉冲（模拟的上游事件）
#[derive(Debug, Clone, Copy)]
pub struct Pulse {
    /// 脉冲序号（全局递增）
    pub seq: u64,

    /// 所属 burst 序号
    pub burst: u32,
}

/// Mock 触发源配置
#[derive(Debug, Clone)]
pub struct MockTriggerConfig {
    /// 源名称
    pub name: String,

    /// 每个 burst 的脉冲数
    pub burst_len: u32,

    /// burst 内脉冲间隔（毫秒）
    pub intra_burst_ms: f64,

    /// burst 之间的静默间隔（毫秒）
    pub burst_gap_ms: f64,

    /// burst 总数
    pub bursts: u32,
}

impl Default for MockTriggerConfig {
    fn default() -> Self {
        Self {
            name: "mock_trigger".to_string(),
            burst_len: 5,
            intra_burst_ms: 10.0,
            burst_gap_ms: 200.0,
            bursts: 3,
        }
    }
}

/// Mock 触发源
///
/// 按配置的 burst 形状生成模拟触发事件，供测试和演示使用。
pub struct MockTriggerSource {
    config: MockTriggerConfig,
    running: Arc<AtomicBool>,
}

impl MockTriggerSource {
    /// 创建新的 Mock 触发源
    pub fn new(config: MockTriggerConfig) -> Self {
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 创建突发式触发源
    pub fn bursty(
        name: &str,
        burst_len: u32,
        intra_burst_ms: f64,
        burst_gap_ms: f64,
        bursts: u32,
    ) -> Self {
        Self::new(MockTriggerConfig {
            name: name.to_string(),
            burst_len,
            intra_burst_ms,
            burst_gap_ms,
            bursts,
        })
    }

    /// 创建匀速触发源（单个连续 burst）
    pub fn steady(name: &str, pulses: u32, interval_ms: f64) -> Self {
        Self::new(MockTriggerConfig {
            name: name.to_string(),
            burst_len: pulses,
            intra_burst_ms: interval_ms,
            bursts: 1,
            ..Default::default()
        })
    }

    /// 启动 Mock 源，返回脉冲流接收端
    ///
    /// # Arguments
    /// * `channel_capacity` - 通道容量
    pub fn start(&self, channel_capacity: usize) -> mpsc::Receiver<Pulse> {
        let (tx, rx) = mpsc::channel(channel_capacity);
        let config = self.config.clone();
        let running = self.running.clone();

        running.store(true, Ordering::SeqCst);

        tokio::spawn(async move {
            let intra = Duration::try_from_secs_f64(config.intra_burst_ms / 1000.0)
                .unwrap_or(Duration::ZERO);
            let gap = Duration::try_from_secs_f64(config.burst_gap_ms / 1000.0)
                .unwrap_or(Duration::ZERO);
            let mut seq: u64 = 0;

            debug!(
                source = %config.name,
                bursts = config.bursts,
                burst_len = config.burst_len,
                "mock trigger source started"
            );

            'schedule: for burst in 0..config.bursts {
                for _ in 0..config.burst_len {
                    if !running.load(Ordering::Relaxed) {
                        break 'schedule;
                    }

                    let pulse = Pulse { seq, burst };
                    seq += 1;

                    if tx.send(pulse).await.is_err() {
                        debug!(source = %config.name, "mock trigger channel closed");
                        break 'schedule;
                    }

                    trace!(source = %config.name, seq = pulse.seq, burst, "mock pulse sent");
                    tokio::time::sleep(intra).await;
                }

                if burst + 1 < config.bursts {
                    tokio::time::sleep(gap).await;
                }
            }

            running.store(false, Ordering::SeqCst);
            debug!(source = %config.name, emitted = seq, "mock trigger source stopped");
        });

        rx
    }

    /// 停止 Mock 源
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// 检查是否正在运行
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_bursty_source_emits_schedule() {
        let source = MockTriggerSource::bursty("test_bursts", 3, 5.0, 50.0, 2);
        let mut rx = source.start(16);

        let mut pulses = Vec::new();
        while let Some(pulse) = rx.recv().await {
            pulses.push(pulse);
        }

        assert_eq!(pulses.len(), 6);
        assert_eq!(pulses[0].burst, 0);
        assert_eq!(pulses[5].burst, 1);
        // 序号全局递增
        assert_eq!(pulses[5].seq, 5);
        assert!(!source.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_emission() {
        let source = MockTriggerSource::steady("test_stop", 1000, 10.0);
        let mut rx = source.start(16);

        let first = rx.recv().await.expect("first pulse");
        assert_eq!(first.seq, 0);

        source.stop();

        let mut received = 1;
        while rx.recv().await.is_some() {
            received += 1;
        }

        assert!(received < 1000, "emission should stop early, got {received}");
    }
}
