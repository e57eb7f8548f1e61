//! Scavjob 控制器入口
//!
//! 初始化日志、加载配置、连接集群，然后运行协调主流程；致命错误以非零状态码退出。

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use scavjob::cluster::KubeJobClient;
use scavjob::core::ShutdownManager;
use scavjob::{load_config, observability, run_controller};

#[derive(Parser, Debug)]
#[command(name = "scavjob")]
#[command(about = "Reconciles ScavengerJob resources against a directory of job data dirs", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init();

    // 缺少 --config 时 clap 打印用法并以非零状态退出
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    let client = KubeJobClient::try_default()
        .await
        .context("Failed to create the cluster client")?;

    let shutdown = ShutdownManager::new();
    shutdown.install_signal_handlers();

    // 致命错误交给 anyhow 打印并以非零状态退出
    run_controller(&config, Arc::new(client), &shutdown)
        .await
        .context("Controller stopped")?;

    tracing::info!("Controller shut down");
    Ok(())
}
