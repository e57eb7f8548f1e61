//! 集群客户端抽象
//!
//! 所有后端（kube / Mock）实现 JobClient：按命名空间列出、创建、删除 ScavengerJob 资源。
//! 资源体对协调逻辑是不透明的，只读取 name / namespace。

use async_trait::async_trait;
use kube::api::{ApiResource, DynamicObject, GroupVersionKind};
use thiserror::Error;

pub const SCAVENGER_JOB_GROUP: &str = "core.cerit.cz";
pub const SCAVENGER_JOB_VERSION: &str = "v1";
pub const SCAVENGER_JOB_KIND: &str = "ScavengerJob";

/// ScavengerJob 自定义资源的 GVK
pub fn scavenger_job_gvk() -> GroupVersionKind {
    GroupVersionKind::gvk(SCAVENGER_JOB_GROUP, SCAVENGER_JOB_VERSION, SCAVENGER_JOB_KIND)
}

/// 由 GVK 推导的 API 资源描述（复数形式 scavengerjobs）
pub fn scavenger_job_resource() -> ApiResource {
    ApiResource::from_gvk(&scavenger_job_gvk())
}

/// 集群调用错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("not found: {0}")]
    NotFound(String),

    /// API 服务器拒绝了请求（配额、校验、已存在等）
    #[error("rejected: {0}")]
    Rejected(String),

    /// 连接、认证或序列化失败
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<kube::Error> for ClientError {
    fn from(e: kube::Error) -> Self {
        match e {
            kube::Error::Api(resp) if resp.code == 404 => ClientError::NotFound(resp.message),
            kube::Error::Api(resp) => {
                ClientError::Rejected(format!("{} ({}, {})", resp.message, resp.reason, resp.code))
            }
            other => ClientError::Transport(other.to_string()),
        }
    }
}

/// ScavengerJob 客户端 trait，所有调用均限定在单个命名空间内
#[async_trait]
pub trait JobClient: Send + Sync {
    /// 列出命名空间内的作业；`name` 为 Some 时按 metadata.name 精确匹配
    async fn list(
        &self,
        namespace: &str,
        name: Option<&str>,
    ) -> Result<Vec<DynamicObject>, ClientError>;

    /// 提交完整的资源对象
    async fn create(&self, namespace: &str, job: &DynamicObject) -> Result<(), ClientError>;

    /// 按名称删除
    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError>;
}
