//! Scavjob - 目录驱动的 ScavengerJob 协调控制器
//!
//! 数据目录下每个子目录对应一个作业；控制器按固定周期把集群中的 ScavengerJob 收敛到目录描述的期望状态。
//!
//! 模块划分：
//! - **config**: 配置加载（YAML 文件 + 环境变量）
//! - **core**: 错误类型、错误处置策略、关闭信号
//! - **cluster**: 集群客户端抽象与实现（kube / Mock）
//! - **jobs**: 作业身份、目录扫描、清单模板与解析
//! - **reconcile**: 生命周期操作、协调缓存、协调器、轮询调度
//! - **observability**: 日志初始化

pub mod cluster;
pub mod config;
pub mod core;
pub mod jobs;
pub mod observability;
pub mod reconcile;

pub use config::{load_config, ControllerConfig};
pub use reconcile::{run_controller, Reconciler};
