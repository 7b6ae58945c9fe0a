// ============================================================================
// Locsmith - 运行结果数据模型
// ============================================================================
//
// 文件: src/models/report.rs
// 职责: 提取/还原/同步/清理运行结果的数据结构
// 边界:
//   - ✅ 运行统计数据结构定义
//   - ✅ 汇总计数辅助方法
//   - ✅ JSON 序列化支持
//   - ❌ 不应包含输出格式化
//   - ❌ 不应包含流水线逻辑
//
// ============================================================================

use serde::Serialize;
use std::path::PathBuf;

/// 同一个键对应了两段不同文本
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    /// 冲突的键
    pub key: String,
    /// 保留的文本
    pub kept: String,
    /// 被丢弃的文本
    pub rejected: String,
}

/// 单个文件的失败信息
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// 提取运行结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractReport {
    /// 扫描的文件数
    pub files_scanned: usize,
    /// 被改写的文件
    pub files_touched: Vec<PathBuf>,
    /// 替换次数
    pub substitutions: usize,
    /// 新增到规范目录的键数
    pub keys_added: usize,
    /// 合并后规范目录的键总数
    pub total_keys: usize,
    /// 键冲突
    pub collisions: Vec<KeyCollision>,
    /// 读取失败的文件
    pub failures: Vec<FileFailure>,
    /// 是否为预演
    pub dry_run: bool,
}

/// 未能解析的占位符
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedPlaceholder {
    pub path: PathBuf,
    pub key: String,
}

/// 还原运行结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct RestoreReport {
    pub files_scanned: usize,
    pub files_touched: Vec<PathBuf>,
    /// 已还原的占位符数
    pub restored: usize,
    pub unresolved: Vec<UnresolvedPlaceholder>,
    pub failures: Vec<FileFailure>,
    pub dry_run: bool,
}

/// 翻译后未通过校验的单元
#[derive(Debug, Clone, Serialize)]
pub struct RejectedUnit {
    /// 点分路径
    pub path: String,
    pub reason: String,
}

/// 单个语言的同步状态
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LanguageStatus {
    /// 已翻译并写回
    Updated {
        translated: usize,
        rejected: Vec<RejectedUnit>,
        conflicts: Vec<String>,
    },
    /// 预演：有待翻译的单元
    Pending { missing: usize },
    /// 没有缺失的键
    UpToDate,
    /// 没有语言代码绑定
    Unbound,
    /// 翻译或写回失败，本次跳过
    Failed { message: String },
}

/// 单个语言的同步结果
#[derive(Debug, Clone, Serialize)]
pub struct LanguageOutcome {
    /// 目录文件名
    pub file: String,
    /// 绑定的语言代码
    pub code: Option<String>,
    #[serde(flatten)]
    pub status: LanguageStatus,
}

/// 同步运行结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub languages: Vec<LanguageOutcome>,
    pub dry_run: bool,
}

impl SyncReport {
    /// 已翻译的单元总数
    pub fn units_translated(&self) -> usize {
        self.languages
            .iter()
            .map(|outcome| match &outcome.status {
                LanguageStatus::Updated { translated, .. } => *translated,
                _ => 0,
            })
            .sum()
    }

    /// 已更新的语言数
    pub fn languages_updated(&self) -> usize {
        self.languages
            .iter()
            .filter(|outcome| matches!(outcome.status, LanguageStatus::Updated { .. }))
            .count()
    }

    /// 被跳过的语言数（未绑定或失败）
    pub fn languages_skipped(&self) -> usize {
        self.languages
            .iter()
            .filter(|outcome| {
                matches!(
                    outcome.status,
                    LanguageStatus::Unbound | LanguageStatus::Failed { .. }
                )
            })
            .count()
    }

    /// 按文件名查找结果
    pub fn outcome(&self, file: &str) -> Option<&LanguageOutcome> {
        self.languages.iter().find(|outcome| outcome.file == file)
    }
}

/// 清理运行结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct PruneReport {
    pub removed: usize,
    pub remaining: usize,
    pub dry_run: bool,
}
