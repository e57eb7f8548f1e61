//! 期望状态扫描
//!
//! 列出数据目录的直接子目录（跳过文件与以 `.` 开头的条目），
//! 每个子目录对应一个作业；子目录内存在 `finished` 文件即视为已完成。

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::ReconcileError;
use crate::jobs::JobDescriptor;

/// 作业完成标记文件名
pub const FINISHED_MARKER: &str = "finished";

/// 扫描器：绑定数据目录、作业名前缀与命名空间
#[derive(Debug, Clone)]
pub struct DesiredStateScanner {
    root: PathBuf,
    prefix: String,
    namespace: String,
}

impl DesiredStateScanner {
    pub fn new(root: impl AsRef<Path>, prefix: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            prefix: prefix.into(),
            namespace: namespace.into(),
        }
    }

    /// 扫描数据目录；目录不可读属于配置错误，直接返回致命错误（不做部分扫描）
    pub async fn scan(&self) -> Result<Vec<JobDescriptor>, ReconcileError> {
        let dirs = list_job_dirs(&self.root).await?;
        let mut jobs = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let finished = is_finished(&self.root.join(&dir)).await;
            jobs.push(JobDescriptor::from_dir_name(
                &self.prefix,
                &dir,
                finished,
                self.namespace.as_str(),
            ));
        }
        tracing::debug!(root = %self.root.display(), count = jobs.len(), "scanned data dir");
        Ok(jobs)
    }
}

/// 列出作业目录名（按原始字节排序，不做编码转换）
async fn list_job_dirs(root: &Path) -> Result<Vec<OsString>, ReconcileError> {
    let data_dir_err = |source| ReconcileError::DataDir {
        path: root.to_path_buf(),
        source,
    };

    let mut entries = tokio::fs::read_dir(root).await.map_err(data_dir_err)?;
    let mut dirs = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(data_dir_err)? {
        let name = entry.file_name();
        if name.as_encoded_bytes().starts_with(b".") {
            continue;
        }
        // file_type 不跟随符号链接
        let is_dir = entry.file_type().await.map_err(data_dir_err)?.is_dir();
        if is_dir {
            dirs.push(name);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// stat 成功即视为已完成；任何 stat 失败都只是「未完成」
async fn is_finished(job_dir: &Path) -> bool {
    tokio::fs::metadata(job_dir.join(FINISHED_MARKER)).await.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::identity::job_name;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_scan_classifies_dirs() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("alpha")).unwrap();
        std::fs::create_dir(dir.path().join("beta")).unwrap();
        std::fs::write(dir.path().join("beta").join(FINISHED_MARKER), "").unwrap();

        let scanner = DesiredStateScanner::new(dir.path(), "scav", "batch");
        let jobs = scanner.scan().await.unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].source_dir(), "alpha");
        assert!(!jobs[0].is_finished());
        assert_eq!(jobs[0].name(), job_name("scav", "alpha"));
        assert_eq!(jobs[1].source_dir(), "beta");
        assert!(jobs[1].is_finished());
        assert_eq!(jobs[1].namespace(), "batch");
    }

    #[tokio::test]
    async fn test_scan_skips_hidden_and_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".staging")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a job").unwrap();
        std::fs::create_dir(dir.path().join("gamma")).unwrap();

        let scanner = DesiredStateScanner::new(dir.path(), "scav", "batch");
        let jobs = scanner.scan().await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].source_dir(), "gamma");
    }

    #[tokio::test]
    async fn test_marker_dir_counts_as_finished() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("delta").join(FINISHED_MARKER)).unwrap();

        let scanner = DesiredStateScanner::new(dir.path(), "scav", "batch");
        let jobs = scanner.scan().await.unwrap();
        assert!(jobs[0].is_finished());
    }

    #[tokio::test]
    async fn test_scan_empty_dir() {
        let dir = TempDir::new().unwrap();
        let scanner = DesiredStateScanner::new(dir.path(), "scav", "batch");
        assert!(scanner.scan().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let scanner = DesiredStateScanner::new(dir.path().join("missing"), "scav", "batch");
        let err = scanner.scan().await.unwrap_err();
        assert!(matches!(err, ReconcileError::DataDir { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_utf8_dirs_keep_distinct_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let done = dir.path().join(OsStr::from_bytes(b"job\xff"));
        let running = dir.path().join(OsStr::from_bytes(b"job\xfe"));
        std::fs::create_dir(&done).unwrap();
        std::fs::write(done.join(FINISHED_MARKER), "").unwrap();
        std::fs::create_dir(&running).unwrap();

        let scanner = DesiredStateScanner::new(dir.path(), "scav", "batch");
        let jobs = scanner.scan().await.unwrap();

        assert_eq!(jobs.len(), 2);
        // 0xfe < 0xff
        assert_eq!(jobs[0].name(), job_name("scav", b"job\xfe"));
        assert!(!jobs[0].is_finished());
        assert_eq!(jobs[1].name(), job_name("scav", b"job\xff"));
        assert!(jobs[1].is_finished());
        assert_ne!(jobs[0].name(), jobs[1].name());
    }
}
