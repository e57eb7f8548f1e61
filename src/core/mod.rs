//! 核心层：错误类型、错误处置策略、关闭信号

pub mod error;
pub mod recovery;
pub mod shutdown;

pub use error::{Disposition, ReconcileError};
pub use recovery::ErrorPolicy;
pub use shutdown::ShutdownManager;
