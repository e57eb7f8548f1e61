//! 作业层：身份推导、期望状态扫描、清单模板与解析

pub mod descriptor;
pub mod identity;
pub mod manifest;
pub mod scanner;
pub mod template;

pub use descriptor::JobDescriptor;
pub use identity::{identity, job_name};
pub use manifest::decode_manifest;
pub use scanner::{DesiredStateScanner, FINISHED_MARKER};
pub use template::JobTemplate;
