//! 协调层：作业生命周期操作、协调缓存、协调器、轮询调度

pub mod cache;
pub mod lifecycle;
pub mod reconciler;
pub mod scheduler;

use std::sync::Arc;

pub use cache::ReconciliationCache;
pub use lifecycle::JobLifecycle;
pub use reconciler::{CycleReport, Reconciler};
pub use scheduler::PollScheduler;

use crate::cluster::JobClient;
use crate::config::ControllerConfig;
use crate::core::{ReconcileError, ShutdownManager};

/// 控制器主流程：启动协调一次，然后按固定周期轮询，直到关闭信号或致命错误
pub async fn run_controller(
    config: &ControllerConfig,
    client: Arc<dyn JobClient>,
    shutdown: &ShutdownManager,
) -> Result<(), ReconcileError> {
    let mut reconciler = Reconciler::new(config, client)?;

    tracing::info!(
        namespace = %config.namespace,
        data_dir = %config.data_dir.display(),
        interval_secs = config.refresh_interval,
        "Running startup reconciliation"
    );
    reconciler.startup().await?;

    PollScheduler::new(config.refresh_period())
        .run(&mut reconciler, shutdown)
        .await?;
    Ok(())
}
