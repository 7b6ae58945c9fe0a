// ============================================================================
// Locsmith - 工具模块
// ============================================================================
//
// 文件: src/utils/mod.rs
// 职责: 颜色、常量和日志工具导出
//
// ============================================================================

pub mod colors;
pub mod constants;
pub mod logger;
