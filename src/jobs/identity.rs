//! 作业身份：目录名 -> MD5 十六进制 ID -> `<prefix>-<id>` 作业名
//!
//! 作业名是文件系统与集群之间唯一的关联键，因此必须与历史部署产生的名字保持一致。

use md5::{Digest, Md5};

/// 目录名原始字节的 MD5（小写十六进制，32 字符）
pub fn identity(dir_name: impl AsRef<[u8]>) -> String {
    hex::encode(Md5::digest(dir_name.as_ref()))
}

/// 完整作业名：`<prefix>-<identity>`
pub fn job_name(prefix: &str, dir_name: impl AsRef<[u8]>) -> String {
    format!("{}-{}", prefix, identity(dir_name))
}
