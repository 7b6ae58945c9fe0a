// ============================================================================
// Locsmith - UI 模块
// ============================================================================
//
// 文件: src/ui/mod.rs
// 职责: 进度条和运行汇总显示组件导出
//
// ============================================================================

pub mod progress;
pub mod summary;
