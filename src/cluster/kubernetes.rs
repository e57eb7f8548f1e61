//! 基于 kube 的 JobClient 实现
//!
//! 使用默认配置（集群内 ServiceAccount 或本地 kubeconfig），对 ScavengerJob 做 list / create / delete。

use async_trait::async_trait;
use kube::api::{Api, ApiResource, DeleteParams, DynamicObject, ListParams, PostParams};

use crate::cluster::{scavenger_job_resource, ClientError, JobClient};
use crate::core::ReconcileError;

/// 真实集群客户端
#[derive(Clone)]
pub struct KubeJobClient {
    client: kube::Client,
    resource: ApiResource,
}

impl KubeJobClient {
    pub fn new(client: kube::Client) -> Self {
        Self {
            client,
            resource: scavenger_job_resource(),
        }
    }

    /// 从环境推断集群连接（KUBECONFIG / ~/.kube/config / 集群内配置）
    pub async fn try_default() -> Result<Self, ReconcileError> {
        let client = kube::Client::try_default()
            .await
            .map_err(|e| ReconcileError::Client(ClientError::from(e)))?;
        Ok(Self::new(client))
    }

    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &self.resource)
    }
}

#[async_trait]
impl JobClient for KubeJobClient {
    async fn list(
        &self,
        namespace: &str,
        name: Option<&str>,
    ) -> Result<Vec<DynamicObject>, ClientError> {
        let mut params = ListParams::default();
        if let Some(name) = name {
            params = params.fields(&format!("metadata.name={}", name));
        }
        let list = self.api(namespace).list(&params).await?;
        Ok(list.items)
    }

    async fn create(&self, namespace: &str, job: &DynamicObject) -> Result<(), ClientError> {
        self.api(namespace)
            .create(&PostParams::default(), job)
            .await?;
        Ok(())
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}
