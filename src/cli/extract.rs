// ============================================================================
// Locsmith - CLI Extract 命令
// ============================================================================
//
// 文件: src/cli/extract.rs
// 职责: 提取命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 扫描工作区并调用提取器
//   - ✅ 结果输出（表格/JSON）
//   - ❌ 不应包含文本识别逻辑
//   - ❌ 不应包含目录合并逻辑
//
// ============================================================================

use anyhow::{Context, Result};
use clap::Args;

use super::OutputFormat;
use crate::core::extractor::{ExtractOptions, Extractor};
use crate::core::scanner::WorkspaceScanner;
use crate::models::config::Config;
use crate::ui::{progress, summary};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 提取内联文本
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// 只计算和报告，不写任何文件
    #[arg(long)]
    pub dry_run: bool,

    /// 输出格式 (table, json)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

pub fn handle_extract(args: ExtractArgs, config: &Config) -> Result<()> {
    Logger::info(t!("extract.start"));

    let scan = WorkspaceScanner::new(config).scan();
    for dir in &scan.missing_dirs {
        Logger::warn(tf!("scan.missing_dir", dir.display()));
    }
    Logger::info(tf!("scan.found_files", scan.files.len()));

    let extractor = Extractor::new(ExtractOptions::from_config(config, args.dry_run))
        .context("invalid extraction pattern")?;

    let catalog_path = config.catalog_path();
    let bar = progress::file_progress(
        scan.files.len(),
        &t!("extract.progress"),
        config.output.show_progress && args.format == OutputFormat::Table,
    );
    let result = extractor.run(&scan.files, &catalog_path, &bar);
    bar.finish_and_clear();

    // 目录写入失败时不会改写任何标记文件
    let report = result.with_context(|| tf!("extract.catalog_failed", catalog_path.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => summary::render_extract(&report, &catalog_path),
    }
    Ok(())
}
