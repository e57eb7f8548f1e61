//! 单个作业的生命周期操作：存在性检查、幂等创建、幂等删除，以及实际状态读取
//!
//! 所有查询失败都是致命的：无法确认集群现状时宁可退出，也不冒重复创建或误删的风险。
//! 唯一的可恢复错误是集群拒绝创建，记录日志后留给下一轮重试。

use std::sync::Arc;

use kube::api::DynamicObject;
use kube::ResourceExt;

use crate::cluster::{ClientError, JobClient};
use crate::core::{Disposition, ErrorPolicy, ReconcileError};
use crate::jobs::{decode_manifest, JobDescriptor, JobTemplate};

/// 生命周期操作，持有注入的集群客户端与已解析的模板
pub struct JobLifecycle {
    client: Arc<dyn JobClient>,
    template: JobTemplate,
    policy: ErrorPolicy,
}

impl JobLifecycle {
    pub fn new(client: Arc<dyn JobClient>, template: JobTemplate) -> Self {
        Self {
            client,
            template,
            policy: ErrorPolicy::new(),
        }
    }

    /// 按名称精确查找
    async fn get(&self, name: &str, namespace: &str) -> Result<Option<DynamicObject>, ReconcileError> {
        let found = self
            .client
            .list(namespace, Some(name))
            .await
            .map_err(|source| ReconcileError::List {
                namespace: namespace.to_string(),
                source,
            })?;
        Ok(found.into_iter().find(|obj| obj.name_any() == name))
    }

    /// 作业是否存在于集群中
    pub async fn exists(&self, job: &JobDescriptor) -> Result<bool, ReconcileError> {
        Ok(self.get(job.name(), job.namespace()).await?.is_some())
    }

    /// 幂等创建：渲染清单并提交
    ///
    /// 返回 true 表示作业最终存在（已存在或创建成功）；false 表示遇到可恢复错误，下一轮再试。
    /// 其余错误按 ErrorPolicy 向上返回。
    pub async fn create(&self, job: &JobDescriptor) -> Result<bool, ReconcileError> {
        match self.submit(job).await {
            Ok(()) => Ok(true),
            Err(err) => match self.policy.classify(&err) {
                Disposition::RetryNextCycle => {
                    tracing::warn!(workdir = %job.source_dir(), "Not creating job: {}", err);
                    Ok(false)
                }
                Disposition::Terminate => Err(err),
            },
        }
    }

    async fn submit(&self, job: &JobDescriptor) -> Result<(), ReconcileError> {
        let manifest = self.template.render(job)?;
        let obj = decode_manifest(&manifest, job.namespace())?;

        // 再查一次，避免与之前的检查之间出现竞争
        if self.exists(job).await? {
            tracing::info!(job = %job.name(), "Job will not be created since it already exists");
            return Ok(());
        }

        self.client
            .create(job.namespace(), &obj)
            .await
            .map_err(|source| ReconcileError::CreateRejected {
                name: job.name().to_string(),
                source,
            })?;
        tracing::info!(job = %job.name(), workdir = %job.source_dir(), "Created job");
        Ok(())
    }

    /// 幂等删除：不存在时静默返回 false；删除失败是致命的
    pub async fn delete_by_name(&self, name: &str, namespace: &str) -> Result<bool, ReconcileError> {
        if self.get(name, namespace).await?.is_none() {
            return Ok(false);
        }

        tracing::info!(job = %name, "Deleting job");
        match self.client.delete(namespace, name).await {
            Ok(()) => Ok(true),
            // 查找与删除之间被他人删掉，结果一致
            Err(ClientError::NotFound(_)) => {
                tracing::debug!(job = %name, "Job disappeared before delete");
                Ok(false)
            }
            Err(source) => Err(ReconcileError::Delete {
                name: name.to_string(),
                source,
            }),
        }
    }

    /// 实际状态：命名空间内名称以 prefix 开头的全部作业
    pub async fn list_active(
        &self,
        namespace: &str,
        prefix: &str,
    ) -> Result<Vec<DynamicObject>, ReconcileError> {
        let all = self
            .client
            .list(namespace, None)
            .await
            .map_err(|source| ReconcileError::List {
                namespace: namespace.to_string(),
                source,
            })?;
        Ok(all
            .into_iter()
            .filter(|obj| obj.name_any().starts_with(prefix))
            .collect())
    }
}
