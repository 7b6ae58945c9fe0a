// ============================================================================
// Locsmith - 库入口
// ============================================================================
//
// 文件: src/lib.rs
// 职责: 模块声明，供二进制入口和集成测试使用
//
// ============================================================================

pub mod cli;
pub mod core;
pub mod i18n;
pub mod models;
pub mod ui;
pub mod utils;
