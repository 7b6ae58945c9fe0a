// ============================================================================
// Locsmith - 常量定义
// ============================================================================
//
// 文件: src/utils/constants.rs
// 职责: 应用程序常量定义
// 边界:
//   - ✅ 应用程序常量定义
//   - ✅ 占位符语法常量
//   - ✅ 图标字符定义
//   - ❌ 不应包含动态配置
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含文件路径处理
//
// ============================================================================

/// 应用名称常量
pub const APP_NAME: &str = "LOCSMITH";

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "locsmith.toml";

/// 占位符语法
pub mod placeholder {
    /// 包装起始
    pub const WRAPPER_START: &str = "{t('";
    /// 包装结束
    pub const WRAPPER_END: &str = "')}";
}

/// 生成键默认前缀，用于区分手写键
pub const DEFAULT_KEY_PREFIX: &str = "txt_";

/// 默认哈希截断长度（十六进制字符数）
pub const DEFAULT_KEY_HASH_LENGTH: usize = 8;

/// 哈希截断长度允许的范围
pub const KEY_HASH_LENGTH_RANGE: std::ops::RangeInclusive<usize> = 4..=32;

/// 锁文件后缀
pub const LOCK_SUFFIX: &str = "lock";

/// 图标
pub mod icons {
    /// 成功图标
    pub const SUCCESS: &str = "✓";
    /// 错误图标
    pub const ERROR: &str = "✗";
    /// 警告图标
    pub const WARNING: &str = "!";
    /// 文件图标
    pub const FILE: &str = "●";
    /// 键图标
    pub const KEY: &str = "◆";
    /// 语言图标
    pub const LANGUAGE: &str = "◇";
    /// 跳过图标
    pub const SKIP: &str = "○";
}

/// 进度条字符
pub mod progress_chars {
    /// 进度条字符集（已完成、当前、未完成）
    pub const BAR: &str = "█▓░";
}

/// 加载动画字符
pub mod spinner_chars {
    pub const BASE: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
}
