//! 协调器：期望状态（目录扫描）与实际状态（集群）之间的三方差异
//!
//! - startup：进程启动时执行一次，直接查询集群，修复停机期间累积的偏差
//! - poll_cycle：之后每个周期执行，信任上一轮缓存，只对状态变化的作业发起集群调用

use std::collections::HashSet;
use std::sync::Arc;

use kube::ResourceExt;

use crate::cluster::JobClient;
use crate::config::ControllerConfig;
use crate::core::ReconcileError;
use crate::jobs::{DesiredStateScanner, JobTemplate};
use crate::reconcile::{JobLifecycle, ReconciliationCache};

/// 一轮协调的结果，仅用于日志与测试
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// 确认运行中（本轮创建成功或已存在）
    pub started: Vec<String>,
    /// 创建被拒绝，下一轮重试
    pub failed: Vec<String>,
    /// 实际发出了删除调用
    pub deleted: Vec<String>,
    /// 缓存命中，未发起任何调用
    pub carried: Vec<String>,
}

impl CycleReport {
    fn log_summary(&self, pass: &str) {
        tracing::info!(
            pass,
            started = self.started.len(),
            failed = self.failed.len(),
            deleted = self.deleted.len(),
            carried = self.carried.len(),
            "Reconciliation pass finished"
        );
    }
}

pub struct Reconciler {
    scanner: DesiredStateScanner,
    lifecycle: JobLifecycle,
    namespace: String,
    prefix: String,
    cache: ReconciliationCache,
}

impl Reconciler {
    /// 模板在此解析，模板错误在启动阶段即暴露
    pub fn new(config: &ControllerConfig, client: Arc<dyn JobClient>) -> Result<Self, ReconcileError> {
        let template = JobTemplate::parse(&config.job_template)?;
        Ok(Self {
            scanner: DesiredStateScanner::new(
                &config.data_dir,
                config.job_name_prefix.as_str(),
                config.namespace.as_str(),
            ),
            lifecycle: JobLifecycle::new(client, template),
            namespace: config.namespace.clone(),
            prefix: config.job_name_prefix.clone(),
            cache: ReconciliationCache::new(),
        })
    }

    pub fn cache(&self) -> &ReconciliationCache {
        &self.cache
    }

    /// 启动时的完整协调（不读、不写缓存）
    pub async fn startup(&mut self) -> Result<CycleReport, ReconcileError> {
        let desired = self.scanner.scan().await?;
        let actual = self.lifecycle.list_active(&self.namespace, &self.prefix).await?;
        let desired_names: HashSet<&str> = desired.iter().map(|job| job.name()).collect();

        let mut report = CycleReport::default();
        for job in &desired {
            // 停机期间完成的作业
            if job.is_finished() {
                if self.lifecycle.delete_by_name(job.name(), job.namespace()).await? {
                    report.deleted.push(job.name().to_string());
                }
                continue;
            }

            if self.lifecycle.create(job).await? {
                report.started.push(job.name().to_string());
            } else {
                report.failed.push(job.name().to_string());
            }
        }

        // 停机期间目录被移除的作业
        for obj in &actual {
            let name = obj.name_any();
            if desired_names.contains(name.as_str()) {
                continue;
            }
            tracing::info!(job = %name, "Deleting orphaned job");
            if self.lifecycle.delete_by_name(&name, &self.namespace).await? {
                report.deleted.push(name);
            }
        }

        report.log_summary("startup");
        Ok(report)
    }

    /// 稳态轮询：按上一轮缓存分类，结束时整体替换缓存
    pub async fn poll_cycle(&mut self) -> Result<CycleReport, ReconcileError> {
        let desired = self.scanner.scan().await?;
        let desired_names: HashSet<&str> = desired.iter().map(|job| job.name()).collect();

        let mut report = CycleReport::default();
        let mut next = ReconciliationCache::new();

        for job in &desired {
            let known = self.cache.contains(job.name());
            match (job.is_finished(), known) {
                (true, true) => {
                    tracing::info!(job = %job.name(), workdir = %job.source_dir(), "Deleting finished job");
                    if self.lifecycle.delete_by_name(job.name(), job.namespace()).await? {
                        report.deleted.push(job.name().to_string());
                    }
                }
                // 已不存在或从未启动
                (true, false) => {}
                (false, true) => {
                    next.insert(job.name());
                    report.carried.push(job.name().to_string());
                }
                (false, false) => {
                    if self.lifecycle.create(job).await? {
                        next.insert(job.name());
                        report.started.push(job.name().to_string());
                    } else {
                        report.failed.push(job.name().to_string());
                    }
                }
            }
        }

        let orphans: Vec<String> = self
            .cache
            .iter()
            .filter(|name| !desired_names.contains(name))
            .map(str::to_string)
            .collect();
        for name in orphans {
            tracing::info!(job = %name, "Deleting job whose data dir disappeared");
            if self.lifecycle.delete_by_name(&name, &self.namespace).await? {
                report.deleted.push(name);
            }
        }

        self.cache.replace(next);
        report.log_summary("poll");
        Ok(report)
    }
}
