// ============================================================================
// Locsmith - 日志工具
// ============================================================================
//
// 文件: src/utils/logger.rs
// 职责: 面向用户的诊断输出和 tracing 初始化
// 边界:
//   - ✅ 日志格式化输出
//   - ✅ tracing 订阅器初始化
//   - ✅ 控制台输出控制
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含文件日志写入
//
// ============================================================================

use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

use super::colors::Colors;
use super::constants::APP_NAME;

/// 诊断输出是否改写到 stderr（stdout 留给机器可读的结果）
static DIAGNOSTICS_TO_STDERR: AtomicBool = AtomicBool::new(false);

/// 简单的日志工具
pub struct Logger;

impl Logger {
    /// 把 info/warn/success 输出切换到 stderr
    pub fn set_diagnostics_to_stderr(enabled: bool) {
        DIAGNOSTICS_TO_STDERR.store(enabled, Ordering::Relaxed);
    }

    pub fn diagnostics_to_stderr() -> bool {
        DIAGNOSTICS_TO_STDERR.load(Ordering::Relaxed)
    }

    fn emit(line: String) {
        if Self::diagnostics_to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn info<S: AsRef<str>>(msg: S) {
        Self::emit(format!("{} {}", Colors::info(&format!("[{}]", APP_NAME)), msg.as_ref()));
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        Self::emit(format!("{} {}", Colors::warn("[WARN]"), msg.as_ref()));
    }

    pub fn error<S: AsRef<str>>(msg: S) {
        eprintln!("{} {}", Colors::error("[ERROR]"), msg.as_ref());
    }

    pub fn success<S: AsRef<str>>(msg: S) {
        Self::emit(format!(
            "{} {}",
            Colors::success(&format!("[{}]", APP_NAME)),
            msg.as_ref()
        ));
    }

    /// 初始化 tracing（RUST_LOG 优先，否则按 verbose 选择默认级别）
    pub fn init_tracing(verbose: bool) {
        let default_level = if verbose { "locsmith=debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        // 重复初始化（例如测试中）时忽略错误
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_can_be_moved_off_stdout() {
        Logger::set_diagnostics_to_stderr(true);
        assert!(Logger::diagnostics_to_stderr());
        Logger::info("routed to stderr");

        Logger::set_diagnostics_to_stderr(false);
        assert!(!Logger::diagnostics_to_stderr());
    }
}
