//! JobDescriptor：一次扫描得到的单个作业（期望状态的基本单元）

use std::ffi::OsStr;

use crate::jobs::identity;

/// 期望作业；构造后不可变，重新扫描会产生新的描述符
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobDescriptor {
    identity: String,
    name: String,
    source_dir: String,
    finished: bool,
    namespace: String,
}

impl JobDescriptor {
    pub fn new(
        prefix: &str,
        source_dir: impl Into<String>,
        finished: bool,
        namespace: impl Into<String>,
    ) -> Self {
        let source_dir = source_dir.into();
        let identity = identity::identity(&source_dir);
        Self::assemble(prefix, identity, source_dir, finished, namespace.into())
    }

    /// 由扫描到的目录名构造：ID 取自原始字节，非 UTF-8 名称只在 source_dir 中有损显示
    pub fn from_dir_name(
        prefix: &str,
        dir_name: &OsStr,
        finished: bool,
        namespace: impl Into<String>,
    ) -> Self {
        let identity = identity::identity(dir_name.as_encoded_bytes());
        let source_dir = dir_name.to_string_lossy().into_owned();
        Self::assemble(prefix, identity, source_dir, finished, namespace.into())
    }

    fn assemble(
        prefix: &str,
        identity: String,
        source_dir: String,
        finished: bool,
        namespace: String,
    ) -> Self {
        Self {
            name: format!("{}-{}", prefix, identity),
            identity,
            source_dir,
            finished,
            namespace,
        }
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// 作业名（文件系统与集群之间的关联键）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 来源目录名（非完整路径）
    pub fn source_dir(&self) -> &str {
        &self.source_dir
    }

    /// 扫描时目录内是否存在 finished 标记文件
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// 模板占位符取值：`{{ .Name }}` 等
    pub fn template_field(&self, field: &str) -> Option<String> {
        match field {
            "Name" => Some(self.name.clone()),
            "DataDir" => Some(self.source_dir.clone()),
            "Finished" => Some(self.finished.to_string()),
            "Namespace" => Some(self.namespace.clone()),
            "Identity" => Some(self.identity.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_name_matches_job_name() {
        let d = JobDescriptor::new("scav", "alpha", false, "batch");
        assert_eq!(d.name(), identity::job_name("scav", "alpha"));
        assert_eq!(d.source_dir(), "alpha");
        assert_eq!(d.namespace(), "batch");
        assert!(!d.is_finished());
    }

    #[test]
    fn test_template_fields() {
        let d = JobDescriptor::new("scav", "alpha", true, "batch");
        assert_eq!(d.template_field("Finished").as_deref(), Some("true"));
        assert_eq!(d.template_field("DataDir").as_deref(), Some("alpha"));
        assert_eq!(d.template_field("Identity").as_deref(), Some(d.identity()));
        assert!(d.template_field("Missing").is_none());
    }

    #[test]
    fn test_from_dir_name_matches_new_for_utf8() {
        let d = JobDescriptor::from_dir_name("scav", OsStr::new("alpha"), false, "batch");
        assert_eq!(d, JobDescriptor::new("scav", "alpha", false, "batch"));
    }
}
