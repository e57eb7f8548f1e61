//! 关闭信号：Ctrl+C / SIGTERM -> CancellationToken
//!
//! 轮询循环只在等待下一次 tick 时观察该 token，进行中的轮次与集群调用不会被打断。

use tokio_util::sync::CancellationToken;

#[derive(Clone, Default)]
pub struct ShutdownManager {
    token: CancellationToken,
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求关闭；重复调用无副作用
    pub fn shutdown(&self) {
        self.token.cancel();
    }

    pub async fn wait_for_shutdown(&self) {
        self.token.cancelled().await;
    }

    /// 后台等待 Ctrl+C 或 SIGTERM，任一到达即请求关闭
    pub fn install_signal_handlers(&self) {
        let token = self.token.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            token.cancel();
        });
    }
}

async fn wait_for_signal() {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, stopping after the current cycle");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, stopping after the current cycle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_wakes_waiter() {
        let manager = ShutdownManager::new();
        let waiter = manager.clone();
        let handle = tokio::spawn(async move { waiter.wait_for_shutdown().await });

        manager.shutdown();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_shut_down_until_requested() {
        let manager = ShutdownManager::new();
        let waited = tokio::time::timeout(Duration::from_secs(60), manager.wait_for_shutdown()).await;
        assert!(waited.is_err());

        manager.shutdown();
        manager.shutdown();
        manager.wait_for_shutdown().await;
    }
}
