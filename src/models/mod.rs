// ============================================================================
// Locsmith - 数据模型模块
// ============================================================================
//
// 文件: src/models/mod.rs
// 职责: 配置、错误和运行结果数据模型导出
//
// ============================================================================

pub mod config;
pub mod error;
pub mod report;

pub use config::{Config, RuntimeArgs};
pub use error::PipelineError;
pub use report::{ExtractReport, PruneReport, RestoreReport, SyncReport};
