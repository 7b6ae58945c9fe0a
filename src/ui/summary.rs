// ============================================================================
// Locsmith - 运行结果汇总组件
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 提取/还原/同步/清理结果的表格显示
// 边界:
//   - ✅ 统计信息格式化输出
//   - ✅ 警告列表（冲突、未解析键、失败文件、跳过的语言）
//   - ✅ 国际化文本支持
//   - ❌ 不应包含流水线逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use std::io::{self, Write};
use std::path::Path;

use crate::models::report::{
    ExtractReport, FileFailure, LanguageOutcome, LanguageStatus, PruneReport, RestoreReport,
    SyncReport,
};
use crate::utils::colors::Colors;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

const RULE: &str = "═══════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────";

fn header(title: &str, dry_run: bool) {
    Logger::info("");
    if dry_run {
        Logger::info(format!("{} {}", Colors::bold(title), Colors::dim(&t!("summary.dry_run"))));
    } else {
        Logger::info(Colors::bold(title).to_string());
    }
    Logger::info(RULE);
}

fn render_failures(failures: &[FileFailure]) {
    if failures.is_empty() {
        return;
    }
    Logger::info("");
    Logger::info(tf!("summary.failures", failures.len()));
    Logger::info(THIN_RULE);
    for failure in failures {
        Logger::warn(format!("{} {}", icons::ERROR, failure.message));
    }
}

// ============================================================================
// 提取汇总
// ============================================================================

pub fn render_extract(report: &ExtractReport, catalog_path: &Path) {
    header(&t!("extract.summary"), report.dry_run);

    Logger::info(format!(
        "{} {}",
        icons::FILE,
        tf!("extract.files_touched", report.files_touched.len(), report.files_scanned)
    ));
    Logger::info(format!(
        "{} {}",
        icons::KEY,
        tf!("extract.substitutions", report.substitutions)
    ));
    Logger::info(format!(
        "{} {}",
        icons::SUCCESS,
        tf!("extract.keys_added", report.keys_added, report.total_keys)
    ));
    Logger::info(format!(
        "{} {}",
        icons::FILE,
        tf!("extract.catalog", catalog_path.display())
    ));

    if !report.collisions.is_empty() {
        Logger::info("");
        Logger::info(tf!("extract.collisions", report.collisions.len()));
        Logger::info(THIN_RULE);
        for collision in &report.collisions {
            Logger::warn(tf!(
                "extract.collision_detail",
                Colors::info(&collision.key),
                collision.kept,
                collision.rejected
            ));
        }
        Logger::info(t!("extract.collision_hint"));
    }

    render_failures(&report.failures);
    let _ = io::stdout().flush();
}

// ============================================================================
// 还原汇总
// ============================================================================

pub fn render_restore(report: &RestoreReport) {
    header(&t!("restore.summary"), report.dry_run);

    Logger::info(format!(
        "{} {}",
        icons::FILE,
        tf!("restore.files_touched", report.files_touched.len(), report.files_scanned)
    ));
    Logger::info(format!(
        "{} {}",
        icons::SUCCESS,
        tf!("restore.restored", report.restored)
    ));

    if !report.unresolved.is_empty() {
        Logger::info("");
        Logger::info(tf!("restore.unresolved", report.unresolved.len()));
        Logger::info(THIN_RULE);
        for missing in &report.unresolved {
            Logger::warn(tf!(
                "restore.unresolved_detail",
                Colors::info(&missing.key),
                missing.path.display()
            ));
        }
    }

    render_failures(&report.failures);
    let _ = io::stdout().flush();
}

// ============================================================================
// 同步汇总
// ============================================================================

pub fn render_sync(report: &SyncReport) {
    header(&t!("sync.summary"), report.dry_run);

    for outcome in &report.languages {
        render_language(outcome);
    }

    Logger::info(THIN_RULE);
    Logger::info(format!(
        "{} {}",
        icons::LANGUAGE,
        tf!(
            "sync.totals",
            report.languages_updated(),
            report.units_translated(),
            report.languages_skipped()
        )
    ));
    let _ = io::stdout().flush();
}

fn render_language(outcome: &LanguageOutcome) {
    let name = match &outcome.code {
        Some(code) => format!("{} ({})", outcome.file, code),
        None => outcome.file.clone(),
    };

    match &outcome.status {
        LanguageStatus::Updated {
            translated,
            rejected,
            conflicts,
        } => {
            Logger::info(format!(
                "{} {}",
                Colors::success(icons::SUCCESS),
                tf!("sync.updated", name, translated)
            ));
            for unit in rejected {
                Logger::warn(tf!("sync.rejected", unit.path, unit.reason));
            }
            for path in conflicts {
                Logger::warn(tf!("sync.conflict", path));
            }
        }
        LanguageStatus::Pending { missing } => {
            Logger::info(format!("{} {}", icons::KEY, tf!("sync.pending", name, missing)));
        }
        LanguageStatus::UpToDate => {
            Logger::info(format!(
                "{} {}",
                Colors::dim(icons::SKIP),
                tf!("sync.up_to_date", name)
            ));
        }
        LanguageStatus::Unbound => {
            Logger::warn(format!("{} {}", icons::WARNING, tf!("sync.unbound", name)));
        }
        LanguageStatus::Failed { message } => {
            Logger::warn(format!(
                "{} {}",
                Colors::error(icons::ERROR),
                tf!("sync.failed", name, message)
            ));
        }
    }
}

// ============================================================================
// 清理汇总
// ============================================================================

pub fn render_prune(report: &PruneReport) {
    header(&t!("prune.summary"), report.dry_run);
    Logger::info(format!(
        "{} {}",
        icons::KEY,
        tf!("prune.removed", report.removed, report.remaining)
    ));
    let _ = io::stdout().flush();
}
