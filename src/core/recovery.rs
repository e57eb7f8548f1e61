//! 错误处置策略
//!
//! 根据 ReconcileError 类型返回 Disposition：只有集群拒绝创建属于可恢复错误，其余一律终止进程。

use crate::core::{Disposition, ReconcileError};

/// 致命 / 可恢复两级策略：把「什么是致命错误」与「如何终止进程」分开
#[derive(Debug, Default, Clone, Copy)]
pub struct ErrorPolicy;

impl ErrorPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, err: &ReconcileError) -> Disposition {
        match err {
            ReconcileError::CreateRejected { .. } => Disposition::RetryNextCycle,
            ReconcileError::Config(_)
            | ReconcileError::DataDir { .. }
            | ReconcileError::List { .. }
            | ReconcileError::Delete { .. }
            | ReconcileError::Template(_)
            | ReconcileError::Manifest(_)
            | ReconcileError::Client(_) => Disposition::Terminate,
        }
    }

    /// 是否应终止进程
    pub fn is_fatal(&self, err: &ReconcileError) -> bool {
        self.classify(err) == Disposition::Terminate
    }
}
