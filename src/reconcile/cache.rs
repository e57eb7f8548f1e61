//! 协调缓存：上一轮确认运行中（或本轮新建成功）的作业名
//!
//! 进程启动时为空，每轮结束整体替换，从不持久化。

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationCache {
    names: BTreeSet<String>,
}

impl ReconciliationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// 整体替换，返回旧缓存
    pub fn replace(&mut self, next: ReconciliationCache) -> ReconciliationCache {
        std::mem::replace(self, next)
    }
}

impl<S: Into<String>> FromIterator<S> for ReconciliationCache {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
