// ============================================================================
// Locsmith - 进度显示组件
// ============================================================================
//
// 文件: src/ui/progress.rs
// 职责: 基于 indicatif 的文件进度条和加载动画
// 边界:
//   - ✅ 进度条样式和创建
//   - ✅ 按配置隐藏进度显示
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含结果汇总
//
// ============================================================================

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::utils::constants::{progress_chars, spinner_chars};

/// 文件进度条；`visible` 为 false 时返回隐藏的进度条
pub fn file_progress(total: usize, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(total as u64);
    // 模板是静态的，解析失败时退回默认样式
    let style = ProgressStyle::with_template("{msg} [{bar:30.cyan/blue}] {pos}/{len} ({elapsed})")
        .map(|style| style.progress_chars(progress_chars::BAR))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar
}

/// 不定时长的加载动画（例如等待翻译后端）
pub fn spinner(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
        .map(|style| style.tick_strings(spinner_chars::BASE))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
