//! 控制器配置：从 YAML 配置文件与环境变量加载
//!
//! 加载顺序：先读 `--config` 指定的文件（必需），再用环境变量 `SCAVJOB__*` 覆盖单个键
//! （如 `SCAVJOB__NAMESPACE=batch`）。配置文件缺失或无效都会在启动时直接失败。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::core::ReconcileError;

/// 配置根；键名沿用 `Namespace`、`JobTemplate` 这种写法，小写形式同样接受
#[derive(Debug, Clone, Deserialize)]
pub struct ControllerConfig {
    /// 作业所在命名空间
    #[serde(rename = "Namespace", alias = "namespace")]
    pub namespace: String,
    /// 作业清单模板，占位符见 jobs::template
    #[serde(rename = "JobTemplate", alias = "jobtemplate")]
    pub job_template: String,
    #[serde(rename = "JobNamePrefix", alias = "jobnameprefix")]
    pub job_name_prefix: String,
    /// 待扫描的数据目录
    #[serde(rename = "DataDir", alias = "datadir")]
    pub data_dir: PathBuf,
    /// 轮询间隔（秒）
    #[serde(rename = "RefreshInterval", alias = "refreshinterval")]
    pub refresh_interval: u64,
}

impl ControllerConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_interval)
    }

    /// 反序列化之后的语义校验
    pub fn validate(&self) -> Result<(), ReconcileError> {
        let required = [
            ("Namespace", self.namespace.trim()),
            ("JobNamePrefix", self.job_name_prefix.trim()),
            ("JobTemplate", self.job_template.trim()),
        ];
        for (key, value) in required {
            if value.is_empty() {
                return Err(ReconcileError::Config(format!("{} must not be empty", key)));
            }
        }
        if self.refresh_interval == 0 {
            return Err(ReconcileError::Config(
                "RefreshInterval must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// 加载配置文件，环境变量 SCAVJOB__* 可覆盖
///
/// 扩展名无法识别（或没有扩展名）的文件按 YAML 读取。
pub fn load_config(config_path: &Path) -> Result<ControllerConfig, ReconcileError> {
    let known_ext = matches!(
        config_path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml" | "toml" | "json")
    );
    let file = if known_ext {
        config::File::from(config_path.to_path_buf())
    } else {
        config::File::new(&config_path.to_string_lossy(), config::FileFormat::Yaml)
    };

    let c = config::Config::builder()
        .add_source(file.required(true))
        .add_source(
            config::Environment::with_prefix("SCAVJOB")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: ControllerConfig = c.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}
