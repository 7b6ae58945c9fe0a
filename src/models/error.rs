// ============================================================================
// Locsmith - 错误类型
// ============================================================================
//
// 文件: src/models/error.rs
// 职责: 流水线错误分类定义
// 边界:
//   - ✅ 错误分类和消息
//   - ✅ 可恢复性判断
//   - ❌ 不应包含错误处理策略
//   - ❌ 不应包含输出逻辑
//
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// 流水线错误
///
/// 只有 [`PipelineError::Setup`] 会导致进程以非零状态退出，
/// 其余错误都在本地吸收并作为诊断信息报告。
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 必需的外部依赖不可用
    #[error("setup failure: {0}")]
    Setup(String),

    /// 源文件无法读取或不是 UTF-8 文本
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写回文件失败
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 目录文件锁获取失败
    #[error("cannot lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 目录序列化失败
    #[error("cannot serialize catalog {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 某个语言的批量翻译失败
    #[error("translation to {code} failed: {message}")]
    Translation { code: String, message: String },
}

impl PipelineError {
    /// 是否为致命错误
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::Setup(_))
    }
}
