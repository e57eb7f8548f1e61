//! Mock 集群客户端（用于测试，无需集群）
//!
//! 在内存中保存作业，记录每一次调用；可配置拒绝创建、列表失败、删除失败以覆盖错误路径。

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use kube::api::DynamicObject;
use kube::ResourceExt;
use tokio::sync::Mutex;

use crate::cluster::{scavenger_job_resource, ClientError, JobClient};

/// 被记录的集群调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    List {
        namespace: String,
        name: Option<String>,
    },
    Create {
        namespace: String,
        name: String,
    },
    Delete {
        namespace: String,
        name: String,
    },
}

#[derive(Default)]
struct MockState {
    /// (namespace, name) -> 作业
    jobs: BTreeMap<(String, String), DynamicObject>,
    calls: Vec<ClientCall>,
    rejected_creates: HashSet<String>,
    fail_lists: bool,
    fail_deletes: bool,
}

/// 内存中的集群
#[derive(Default)]
pub struct MockJobClient {
    state: Mutex<MockState>,
}

impl MockJobClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预置一个已存在的作业（不记录为调用）
    pub async fn seed(&self, namespace: &str, name: &str) {
        let job = DynamicObject::new(name, &scavenger_job_resource()).within(namespace);
        self.state
            .lock()
            .await
            .jobs
            .insert((namespace.to_string(), name.to_string()), job);
    }

    /// 命名空间内现存作业名（有序）
    pub async fn job_names(&self, namespace: &str) -> Vec<String> {
        self.state
            .lock()
            .await
            .jobs
            .keys()
            .filter(|(ns, _)| ns == namespace)
            .map(|(_, name)| name.clone())
            .collect()
    }

    pub async fn get(&self, namespace: &str, name: &str) -> Option<DynamicObject> {
        self.state
            .lock()
            .await
            .jobs
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    pub async fn calls(&self) -> Vec<ClientCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        self.state.lock().await.calls.clear();
    }

    /// 已发起的创建调用（作业名）
    pub async fn created(&self) -> Vec<String> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                ClientCall::Create { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// 已发起的删除调用（作业名）
    pub async fn deleted(&self) -> Vec<String> {
        self.calls()
            .await
            .into_iter()
            .filter_map(|c| match c {
                ClientCall::Delete { name, .. } => Some(name),
                _ => None,
            })
            .collect()
    }

    /// 拒绝指定名称的创建，直到 allow_create
    pub async fn reject_create(&self, name: &str) {
        self.state.lock().await.rejected_creates.insert(name.to_string());
    }

    pub async fn allow_create(&self, name: &str) {
        self.state.lock().await.rejected_creates.remove(name);
    }

    pub async fn set_fail_lists(&self, fail: bool) {
        self.state.lock().await.fail_lists = fail;
    }

    pub async fn set_fail_deletes(&self, fail: bool) {
        self.state.lock().await.fail_deletes = fail;
    }
}

#[async_trait]
impl JobClient for MockJobClient {
    async fn list(
        &self,
        namespace: &str,
        name: Option<&str>,
    ) -> Result<Vec<DynamicObject>, ClientError> {
        let mut state = self.state.lock().await;
        state.calls.push(ClientCall::List {
            namespace: namespace.to_string(),
            name: name.map(str::to_string),
        });
        if state.fail_lists {
            return Err(ClientError::Transport("mock list failure".to_string()));
        }
        Ok(state
            .jobs
            .iter()
            .filter(|((ns, n), _)| ns == namespace && name.map_or(true, |want| n == want))
            .map(|(_, job)| job.clone())
            .collect())
    }

    async fn create(&self, namespace: &str, job: &DynamicObject) -> Result<(), ClientError> {
        let name = job.name_any();
        let mut state = self.state.lock().await;
        state.calls.push(ClientCall::Create {
            namespace: namespace.to_string(),
            name: name.clone(),
        });
        if name.is_empty() {
            return Err(ClientError::Rejected("metadata.name is required".to_string()));
        }
        if state.rejected_creates.contains(&name) {
            return Err(ClientError::Rejected(format!("mock rejected {}", name)));
        }
        let key = (namespace.to_string(), name.clone());
        if state.jobs.contains_key(&key) {
            return Err(ClientError::Rejected(format!("{} already exists", name)));
        }
        let mut stored = job.clone();
        stored.metadata.namespace = Some(namespace.to_string());
        state.jobs.insert(key, stored);
        Ok(())
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().await;
        state.calls.push(ClientCall::Delete {
            namespace: namespace.to_string(),
            name: name.to_string(),
        });
        if state.fail_deletes {
            return Err(ClientError::Transport("mock delete failure".to_string()));
        }
        match state.jobs.remove(&(namespace.to_string(), name.to_string())) {
            Some(_) => Ok(()),
            None => Err(ClientError::NotFound(name.to_string())),
        }
    }
}
