//! 轮询调度：固定周期触发 poll_cycle
//!
//! 首次 tick 在启动协调完成后一个周期触发；错过的 tick 顺延而不补发，轮次之间从不重叠。
//! 只在等待 tick 时响应关闭信号，进行中的轮次总会跑完。

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::{ReconcileError, ShutdownManager};
use crate::reconcile::Reconciler;

#[derive(Debug, Clone, Copy)]
pub struct PollScheduler {
    period: Duration,
}

impl PollScheduler {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// 运行直到收到关闭信号；返回完成的轮次数。致命错误直接向上返回
    pub async fn run(
        &self,
        reconciler: &mut Reconciler,
        shutdown: &ShutdownManager,
    ) -> Result<u64, ReconcileError> {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut cycles = 0u64;
        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait_for_shutdown() => {
                    tracing::info!(cycles, "Poll loop stopped");
                    return Ok(cycles);
                }
                _ = ticker.tick() => {}
            }

            reconciler.poll_cycle().await?;
            cycles += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cluster::MockJobClient;
    use crate::config::ControllerConfig;
    use tempfile::TempDir;

    fn reconciler(dir: &TempDir, client: Arc<MockJobClient>) -> Reconciler {
        let config = ControllerConfig {
            namespace: "batch".to_string(),
            job_template: "apiVersion: core.cerit.cz/v1\nkind: ScavengerJob\nmetadata:\n  name: {{ .Name }}\n"
                .to_string(),
            job_name_prefix: "scav".to_string(),
            data_dir: dir.path().to_path_buf(),
            refresh_interval: 5,
        };
        Reconciler::new(&config, client).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_one_cycle_per_period() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        let client = Arc::new(MockJobClient::new());
        let mut reconciler = reconciler(&dir, client.clone());

        let shutdown = ShutdownManager::new();
        let trigger = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(12)).await;
            trigger.shutdown();
        });

        let cycles = PollScheduler::new(Duration::from_secs(5))
            .run(&mut reconciler, &shutdown)
            .await
            .unwrap();

        // tick 在 5s 与 10s
        assert_eq!(cycles, 2);
        // 第一轮创建，第二轮缓存命中
        assert_eq!(client.created().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_before_first_tick() {
        let dir = TempDir::new().unwrap();
        let client = Arc::new(MockJobClient::new());
        let mut reconciler = reconciler(&dir, client.clone());

        let shutdown = ShutdownManager::new();
        shutdown.shutdown();

        let cycles = PollScheduler::new(Duration::from_secs(5))
            .run(&mut reconciler, &shutdown)
            .await
            .unwrap();
        assert_eq!(cycles, 0);
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_error_stops_loop() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");
        let client = Arc::new(MockJobClient::new());
        let config = ControllerConfig {
            namespace: "batch".to_string(),
            job_template: "kind: ScavengerJob".to_string(),
            job_name_prefix: "scav".to_string(),
            data_dir: missing,
            refresh_interval: 1,
        };
        let mut reconciler = Reconciler::new(&config, client).unwrap();

        let err = PollScheduler::new(Duration::from_secs(1))
            .run(&mut reconciler, &ShutdownManager::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ReconcileError::DataDir { .. }));
    }
}
