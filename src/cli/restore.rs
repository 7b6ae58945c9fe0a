// ============================================================================
// Locsmith - CLI Restore 命令
// ============================================================================
//
// 文件: src/cli/restore.rs
// 职责: 还原命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 加载规范目录并调用还原器
//   - ✅ 结果输出（表格/JSON）
//   - ❌ 不应包含占位符识别逻辑
//
// ============================================================================

use anyhow::{Context, Result};
use clap::Args;

use super::OutputFormat;
use crate::core::catalog;
use crate::core::keygen::KeyGenerator;
use crate::core::restorer::Restorer;
use crate::core::scanner::WorkspaceScanner;
use crate::models::config::Config;
use crate::ui::{progress, summary};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 还原占位符为内联文本
#[derive(Debug, Args)]
pub struct RestoreArgs {
    /// 只计算和报告，不写任何文件
    #[arg(long)]
    pub dry_run: bool,

    /// 输出格式 (table, json)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn handle_restore(args: RestoreArgs, config: &Config) -> Result<()> {
    Logger::info(t!("restore.start"));

    let catalog_path = config.catalog_path();
    let catalog = catalog::load(&catalog_path);
    if catalog.is_empty() {
        Logger::warn(tf!("restore.empty_catalog", catalog_path.display()));
    }

    let scan = WorkspaceScanner::new(config).scan();
    for dir in &scan.missing_dirs {
        Logger::warn(tf!("scan.missing_dir", dir.display()));
    }
    Logger::info(tf!("scan.found_files", scan.files.len()));

    let generator = KeyGenerator::new(&config.extract.key_prefix, config.extract.key_hash_length);
    let restorer = Restorer::new(&generator, args.dry_run).context("invalid restore pattern")?;

    let bar = progress::file_progress(
        scan.files.len(),
        &t!("restore.progress"),
        config.output.show_progress && args.format == OutputFormat::Table,
    );
    let report = restorer.run(&scan.files, &catalog, &bar);
    bar.finish_and_clear();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => summary::render_restore(&report),
    }
    Ok(())
}
