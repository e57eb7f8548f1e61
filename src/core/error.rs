//! 控制器错误类型
//!
//! 与 ErrorPolicy 配合：根据 ReconcileError 决定 Terminate（终止进程）或 RetryNextCycle（下一轮重试）。

use std::path::PathBuf;

use thiserror::Error;

use crate::cluster::ClientError;

/// 协调过程中可能出现的错误（配置、目录扫描、集群调用、模板渲染）
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read data dir {}: {source}", .path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list jobs in namespace {namespace}: {source}")]
    List {
        namespace: String,
        #[source]
        source: ClientError,
    },

    #[error("Failed to delete job {name}: {source}")]
    Delete {
        name: String,
        #[source]
        source: ClientError,
    },

    /// 集群拒绝创建（容量不足等），下一轮轮询会重试
    #[error("Job {name} was not created: {source}")]
    CreateRejected {
        name: String,
        #[source]
        source: ClientError,
    },

    #[error("Job template error: {0}")]
    Template(String),

    #[error("Manifest decode error: {0}")]
    Manifest(String),

    /// 无法建立集群连接（kubeconfig / 集群内配置缺失）
    #[error("Cluster client error: {0}")]
    Client(#[source] ClientError),
}

impl From<config::ConfigError> for ReconcileError {
    fn from(e: config::ConfigError) -> Self {
        ReconcileError::Config(e.to_string())
    }
}

/// 错误策略给出的处置方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 状态无法安全推断，终止进程，交由运维介入
    Terminate,
    /// 记录日志后跳过，下一轮轮询再试
    RetryNextCycle,
}
