//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 模拟 e2e 测试（无需真实事件源）
//! - 时序属性验证（paused-clock）

#[cfg(test)]
mod contract_tests {
    #[test]
    fn test_contracts_compile() {
        // 验证 contracts crate 可编译
        let config = contracts::DebounceConfig::default();
        assert!(config.validate().is_ok());
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use contracts::{DebounceConfig, DebounceError};
    use debounce_engine::{ClosureAction, DebounceBuilder, DebounceHandle, MockTriggerSource};
    use observability::DebounceStatsAggregator;
    use tokio::sync::mpsc;
    use tokio::time::sleep;

    /// 创建带计数动作的防抖实例
    fn counting_handle(name: &str, delay_ms: u64) -> (DebounceHandle, Arc<AtomicU64>) {
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);
        let action = ClosureAction::from_fn(name, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let config = DebounceConfig::new(name, Duration::from_millis(delay_ms));
        let handle = DebounceHandle::spawn(action, config).unwrap();
        (handle, count)
    }

    /// End-to-end test: MockTriggerSource -> DebounceHandle -> counting action
    ///
    /// 验证完整的数据流：
    /// 1. MockTriggerSource 生成突发触发脉冲
    /// 2. 转发循环将脉冲转为 trigger 调用
    /// 3. 每个 burst 折叠为恰好一次动作执行
    #[tokio::test(start_paused = true)]
    async fn test_e2e_burst_pipeline() {
        let source = MockTriggerSource::bursty("pulse_gen", 5, 10.0, 200.0, 3);
        let (handle, run_count) = counting_handle("burst_action", 50);

        let mut pulse_rx = source.start(64);

        let forward = tokio::spawn(async move {
            let mut forwarded = 0u64;
            while let Some(_pulse) = pulse_rx.recv().await {
                if handle.trigger() {
                    forwarded += 1;
                }
            }
            (handle, forwarded)
        });

        let result = tokio::time::timeout(Duration::from_secs(10), forward).await;
        source.stop();

        assert!(result.is_ok(), "Pipeline timed out");
        let (handle, forwarded) = result.unwrap().unwrap();
        assert_eq!(forwarded, 15, "All pulses should be accepted");

        handle.shutdown().await;

        // Burst 间隔超过静默期，burst 内间隔没有：每个 burst 恰好一次执行
        assert_eq!(run_count.load(Ordering::SeqCst), 3);
    }

    /// 尾沿语义的具体时间线
    ///
    /// 调用发生在 t=0/30/60，静默期 100ms：唯一一次执行发生在 t≈160。
    /// t=300 再次调用，第二次执行发生在 t≈400。
    #[tokio::test(start_paused = true)]
    async fn test_trailing_edge_timeline() {
        let (handle, run_count) = counting_handle("timeline", 100);

        handle.trigger();
        sleep(Duration::from_millis(30)).await;
        handle.trigger();
        sleep(Duration::from_millis(30)).await;
        handle.trigger();

        // t=155: 最后一次调用后 95ms，仍在静默期内
        sleep(Duration::from_millis(95)).await;
        assert_eq!(run_count.load(Ordering::SeqCst), 0);

        // t=165: 静默期在 t=160 结束
        sleep(Duration::from_millis(10)).await;
        assert_eq!(run_count.load(Ordering::SeqCst), 1);

        // t=300 再次触发
        sleep(Duration::from_millis(135)).await;
        handle.trigger();
        sleep(Duration::from_millis(105)).await;
        assert_eq!(run_count.load(Ordering::SeqCst), 2);

        handle.shutdown().await;
        assert_eq!(run_count.load(Ordering::SeqCst), 2);
    }

    /// 间隔超过静默期的 burst 各自独立执行
    #[tokio::test(start_paused = true)]
    async fn test_isolated_bursts_fire_separately() {
        let (handle, run_count) = counting_handle("isolated", 40);

        for _ in 0..4 {
            handle.trigger();
            sleep(Duration::from_millis(5)).await;
        }
        sleep(Duration::from_millis(60)).await;
        assert_eq!(run_count.load(Ordering::SeqCst), 1);

        for _ in 0..2 {
            handle.trigger();
            sleep(Duration::from_millis(5)).await;
        }
        sleep(Duration::from_millis(60)).await;
        assert_eq!(run_count.load(Ordering::SeqCst), 2);

        handle.shutdown().await;
    }

    /// 没有触发就没有执行
    #[tokio::test(start_paused = true)]
    async fn test_no_trigger_no_firing() {
        let (handle, run_count) = counting_handle("idle", 20);

        sleep(Duration::from_secs(5)).await;

        assert_eq!(run_count.load(Ordering::SeqCst), 0);
        assert_eq!(handle.metrics().fire_count(), 0);

        handle.shutdown().await;
        assert_eq!(run_count.load(Ordering::SeqCst), 0);
    }

    /// 零静默期仍然异步执行，不在 trigger 调用内联运行
    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_still_asynchronous() {
        let (handle, run_count) = counting_handle("zero", 0);

        handle.trigger();
        assert_eq!(run_count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(1)).await;
        assert_eq!(run_count.load(Ordering::SeqCst), 1);

        handle.shutdown().await;
    }

    /// 各实例的静默期互不干扰
    #[tokio::test(start_paused = true)]
    async fn test_instances_are_independent() {
        let (fast, fast_count) = counting_handle("fast", 50);
        let (slow, slow_count) = counting_handle("slow", 200);

        fast.trigger();
        slow.trigger();

        sleep(Duration::from_millis(100)).await;
        assert_eq!(fast_count.load(Ordering::SeqCst), 1);
        assert_eq!(slow_count.load(Ordering::SeqCst), 0);

        sleep(Duration::from_millis(150)).await;
        assert_eq!(slow_count.load(Ordering::SeqCst), 1);

        fast.trigger();
        sleep(Duration::from_millis(60)).await;
        assert_eq!(fast_count.load(Ordering::SeqCst), 2);
        assert_eq!(slow_count.load(Ordering::SeqCst), 1);

        fast.shutdown().await;
        slow.shutdown().await;
    }

    /// 关闭时完成待决的静默期而不是丢弃它
    #[tokio::test(start_paused = true)]
    async fn test_shutdown_flushes_pending_firing() {
        let (handle, run_count) = counting_handle("flush", 300);

        handle.trigger();
        handle.shutdown().await;

        assert_eq!(run_count.load(Ordering::SeqCst), 1);
    }

    /// 非法配置在构造时立即报错，不会产生运行中的实例
    #[tokio::test]
    async fn test_invalid_config_fails_fast() {
        let err = DebounceBuilder::new("bad")
            .delay_ms(f64::INFINITY)
            .spawn(ClosureAction::from_fn("bad", || {}))
            .unwrap_err();
        assert!(matches!(err, DebounceError::ConfigValidation { .. }));

        let err = DebounceBuilder::new("")
            .spawn(ClosureAction::from_fn("unnamed", || {}))
            .unwrap_err();
        assert!(err.to_string().contains("name"));
    }

    /// Observer 的 FireMeta 流驱动统计聚合器
    #[tokio::test(start_paused = true)]
    async fn test_observer_feeds_stats_aggregator() {
        let (meta_tx, mut meta_rx) = mpsc::channel(16);
        let count = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&count);

        let handle = DebounceBuilder::new("stats")
            .delay(Duration::from_millis(30))
            .observer(meta_tx)
            .spawn(ClosureAction::from_fn("stats", move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        // 两个 burst：5 + 3 次触发
        for _ in 0..5 {
            handle.trigger();
            sleep(Duration::from_millis(5)).await;
        }
        sleep(Duration::from_millis(40)).await;
        for _ in 0..3 {
            handle.trigger();
            sleep(Duration::from_millis(5)).await;
        }

        handle.shutdown().await;

        let mut aggregator = DebounceStatsAggregator::new();
        while let Some(meta) = meta_rx.recv().await {
            aggregator.update(&meta);
        }

        let summary = aggregator.summary();
        assert_eq!(summary.total_fires, 2);
        assert_eq!(summary.total_triggers, 8);
        assert_eq!(summary.suppressed_triggers, 6);
        assert_eq!(aggregator.last_fire_seq, 2);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
